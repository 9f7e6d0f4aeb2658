pub mod filter_service;
pub mod summary_service;

pub use filter_service::{FilterCriteria, FilterService, TypeFilter};
pub use summary_service::{
    net_contribution, BalanceRow, MonthRow, MonthlyPivot, SummaryService, TypeSlice,
};
