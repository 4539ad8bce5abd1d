pub mod account;
pub mod invoice;
pub mod mcp;
pub mod payment;
pub mod transaction;
pub mod webhook;

pub use account::{Account, Wallet, WalletCurrency};
pub use invoice::Invoice;
pub use payment::{PaymentResult, PaymentStatus};
pub use transaction::{
    InitiationVia, PageInfo, Transaction, TransactionDirection, TransactionPage,
    TransactionStatus,
};
pub use webhook::Webhook;
