pub mod use_cases;

pub use use_cases::modification::ModificationUseCase;
pub use use_cases::rule_recommendation::RuleRecommendationUseCase;
pub use use_cases::suggestion::SuggestionUseCase;
