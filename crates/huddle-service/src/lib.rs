//! # huddle-service
//!
//! Application layer: per-domain services, DTOs, and the `Workspace` facade
//! that presentation code talks to.

pub mod dto;
pub mod services;

// Re-export the surface consumed by presentation code
pub use services::{
    AttendanceService, ChannelService, ConversationTarget, InvitationService, LeaveService,
    MessageService, ReactionService, ServiceContext, ServiceError, ServiceResult, SummaryService,
    UserService, Workspace,
};
