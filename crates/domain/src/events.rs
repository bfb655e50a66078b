use crate::models::Deployment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    DeploymentRecorded {
        project_name: String,
        deployment: Deployment,
    },
}
