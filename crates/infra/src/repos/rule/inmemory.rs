use super::IRuleRepo;
use crate::repos::shared::inmemory_repo::*;
use recur_scheduler_domain::{RecurrenceRule, ID};

pub struct InMemoryRuleRepo {
    rules: std::sync::Mutex<Vec<RecurrenceRule>>,
}

impl InMemoryRuleRepo {
    pub fn new() -> Self {
        Self {
            rules: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRuleRepo for InMemoryRuleRepo {
    async fn insert(&self, rule: &RecurrenceRule) -> anyhow::Result<()> {
        insert(rule, &self.rules)
    }

    async fn find(&self, rule_id: &ID) -> Option<RecurrenceRule> {
        find(rule_id, &self.rules)
    }
}
