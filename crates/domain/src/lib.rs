mod commands;
mod error;
mod events;
mod models;
pub mod payloads;

pub use commands::{AlertCommand, AlertDetails};
pub use error::PipelineError;
pub use events::PipelineEvent;
pub use models::{
    AlertRule, ChannelType, Deployment, DeploymentEvent, DeploymentStatus, DispatchResult,
    DispatchStatus, Project, ProjectLookup,
};
