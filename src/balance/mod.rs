//! The aggregate endpoints: the current balance and the inflow and outflow totals.

mod summary_endpoints;

pub use summary_endpoints::{
    BalanceSummary, get_balance_endpoint, get_total_inflow_endpoint, get_total_outflow_endpoint,
};
