pub mod address;
pub mod balance;
pub mod contract;
pub mod purchase;
pub mod session;
pub mod units;
