//! Scheduled job configuration.

use cfgbind_model::{KeyedCollection, MergeStrategy, NodeHeader, NodeSchema, Schema};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scheduler {
    pub header: NodeHeader,
    pub enabled: Option<bool>,
    pub threads: Option<i64>,
    pub jobs: KeyedCollection<Job>,
}

impl Scheduler {
    /// The job named `name`, if one is configured.
    #[must_use]
    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    /// Jobs that are not explicitly disabled, in configuration order.
    pub fn active_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|job| job.enabled != Some(false))
    }
}

impl NodeSchema for Scheduler {
    const TYPE_NAME: &'static str = "scheduler";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Scheduler>()
                .scalar("enabled", |n| &n.enabled, |n| &mut n.enabled)
                .scalar("threads", |n| &n.threads, |n| &mut n.threads)
                .array_at("jobs", "jobs/job", |n| &n.jobs, |n| &mut n.jobs)
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    node_header!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub cron: Option<String>,
    pub enabled: Option<bool>,
}

impl NodeSchema for Job {
    const TYPE_NAME: &'static str = "job";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Job>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar("cron", |n| &n.cron, |n| &mut n.cron)
                .scalar("enabled", |n| &n.enabled, |n| &mut n.enabled)
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    node_header!();

    fn natural_key(&self) -> Option<String> {
        self.name.clone()
    }
}
