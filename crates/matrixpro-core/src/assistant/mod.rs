//! Planning assistant boundary.
//!
//! A question plus a serialized snapshot of the current rows goes out; free
//! text comes back. Context serialization is just the row JSON; how the
//! model uses it is its own business.

use async_trait::async_trait;

use crate::{error::Result, models::PlannerRow};

pub mod gemini;

pub use gemini::GeminiClient;

/// Port for the text-generation backend answering planning questions.
#[async_trait]
pub trait Assistant {
    /// Forward a question with the serialized plan context and return the
    /// answer text.
    async fn ask(&self, question: &str, plan_context: &str) -> Result<String>;
}

/// Serializes the current rows into the prompt context string.
pub fn plan_context(rows: &[PlannerRow]) -> Result<String> {
    Ok(serde_json::to_string(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlannerRow, PriorityGroup, Weekday};

    #[test]
    fn test_plan_context_is_row_json() {
        let mut row = PlannerRow::new(PriorityGroup::P1);
        row.days.get_mut(Weekday::Monday).text = "Ship".to_string();

        let context = plan_context(&[row.clone()]).unwrap();
        let back: Vec<PlannerRow> = serde_json::from_str(&context).unwrap();
        assert_eq!(back, vec![row]);
    }
}
