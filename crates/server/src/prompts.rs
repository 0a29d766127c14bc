use serde::Serialize;

/// Example queries shown by the UI, in two columns
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuggestedPrompts {
    pub column1: &'static [&'static str],
    pub column2: &'static [&'static str],
}

pub const SUGGESTED_PROMPTS: SuggestedPrompts = SuggestedPrompts {
    column1: &[
        "Find Thai restaurants with high ratings in Bangkok",
        "What are the best seafood restaurants in Phuket?",
        "Show me restaurants open late night in Chiang Mai",
        "Find restaurants with outdoor seating in Thailand",
    ],
    column2: &[
        "What are the most popular local restaurants in Thailand?",
        "Find Thai restaurants that serve vegetarian food",
        "What are the best-rated street food spots?",
        "Show me restaurants with traditional Thai cuisine",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_columns_of_four() {
        assert_eq!(SUGGESTED_PROMPTS.column1.len(), 4);
        assert_eq!(SUGGESTED_PROMPTS.column2.len(), 4);
    }

    #[test]
    fn test_serializes_by_column_name() {
        let json = serde_json::to_value(SUGGESTED_PROMPTS).unwrap();
        assert_eq!(
            json["column2"][2],
            "What are the best-rated street food spots?"
        );
    }
}
