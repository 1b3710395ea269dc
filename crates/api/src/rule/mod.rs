pub mod create_rule;

pub use create_rule::CreateRuleUseCase;
