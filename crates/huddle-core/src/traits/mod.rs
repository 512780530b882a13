//! Store and port traits - the seams between domain and infrastructure

mod ports;
mod stores;

pub use ports::{
    AuthenticatedIdentity, MailError, MailReceipt, MailTransport, Summarizer, SummarizerError,
};
pub use stores::{
    AttendanceStore, ChannelDirectory, InvitationRegistry, LeaveStore, MessageStore, StoreResult,
    UserDirectory,
};
