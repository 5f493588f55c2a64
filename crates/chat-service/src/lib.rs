//! # chat-service
//!
//! Application layer containing business logic, services, the eviction
//! sweeper and DTOs.

pub mod dto;
pub mod services;
pub mod sweeper;

pub use dto::{
    CreateMessageRequest, HealthChecks, HealthResponse, MessageResponse, ParticipantResponse,
    ReadinessResponse, RegisterParticipantRequest,
};
pub use services::{
    MessageService, PresenceService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, VisibilityService,
};
pub use sweeper::{EvictionSweeper, SweepReport, SweeperConfig, SweeperHandle};
