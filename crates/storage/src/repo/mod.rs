mod alert_rules;
mod deployments;
mod projects;
