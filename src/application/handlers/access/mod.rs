//! Access-control handlers.

mod block_customer;
mod check_domain_access;
mod unblock_customer;

pub use block_customer::{BlockCustomerCommand, BlockCustomerHandler};
pub use check_domain_access::{
    CheckDomainAccessHandler, CheckDomainAccessQuery, DomainAccess,
};
pub use unblock_customer::{UnblockCustomerCommand, UnblockCustomerHandler};
