use crate::domain::analysis::entities::AnalysisCategory;

const ANALYSIS_TYPE_PLACEHOLDER: &str = "{analysis_type}";

pub const FOOD_PROMPT: &str = "Analyze the food in this image and provide ONLY the following information in a concise format:
1. What is this dish/food? (1-2 sentence description)
2. Approximate weight (in grams)
3. Total calories count

Keep your response brief and to-the-point, without additional information.";

pub const UI_UX_PROMPT: &str = "Review the user interface shown in this screenshot. List the most important usability and visual design issues, then give concrete suggestions to fix each one. Keep the answer short and ordered by impact.";

pub const SECURITY_PROMPT: &str = "Inspect this screenshot for security concerns: exposed secrets or personal data, insecure settings, misleading prompts, or risky user flows. List each finding with a severity (low, medium, high) and a one-line remediation.";

pub const ACCESSIBILITY_PROMPT: &str = "Evaluate this screenshot for accessibility problems: color contrast, text size, missing labels, touch target size, and reliance on color alone. List each problem with the affected element and a suggested fix.";

pub const GENERIC_PROMPT: &str = "Analyze this image with a focus on {analysis_type}. Describe what you see and give a concise, practical summary of the most relevant observations.";

/// Instruction templates per analysis category, resolved once at startup.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    food: String,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PromptCatalog {
    pub fn new(food_override: Option<String>) -> Self {
        let food = food_override
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| FOOD_PROMPT.to_string());

        Self { food }
    }

    pub fn template(&self, category: AnalysisCategory) -> &str {
        match category {
            AnalysisCategory::Food => &self.food,
            AnalysisCategory::UiUx => UI_UX_PROMPT,
            AnalysisCategory::Security => SECURITY_PROMPT,
            AnalysisCategory::Accessibility => ACCESSIBILITY_PROMPT,
            AnalysisCategory::Generic => GENERIC_PROMPT,
        }
    }

    pub fn instruction(&self, analysis_type: &str) -> String {
        let category = AnalysisCategory::from_label(analysis_type);
        self.template(category)
            .replace(ANALYSIS_TYPE_PLACEHOLDER, analysis_type.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_is_the_built_in_calorie_prompt() {
        let catalog = PromptCatalog::default();
        let prompt = catalog.instruction("food");
        assert!(prompt.starts_with("Analyze the food in this image"));
        assert!(prompt.contains("Total calories count"));
    }

    #[test]
    fn unknown_labels_use_the_generic_template() {
        let catalog = PromptCatalog::default();
        let prompt = catalog.instruction("houseplants");
        assert!(prompt.contains("with a focus on houseplants"));
        assert!(!prompt.contains(ANALYSIS_TYPE_PLACEHOLDER));
    }

    #[test]
    fn food_template_can_be_overridden() {
        let catalog = PromptCatalog::new(Some("Count the calories.".to_string()));
        assert_eq!(catalog.instruction("food"), "Count the calories.");
        assert_eq!(catalog.instruction("security"), SECURITY_PROMPT);

        let blank = PromptCatalog::new(Some("   ".to_string()));
        assert_eq!(blank.instruction("food"), FOOD_PROMPT);
    }
}
