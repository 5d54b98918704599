/*!
 * Reflection questions for a passage.
 */

use crate::reference::ParsedReference;

/// Number of questions produced for every reference
pub const QUESTION_COUNT: usize = 8;

/// Eight reflection questions with the book and chapter filled in
pub fn study_questions(parsed: &ParsedReference) -> Vec<String> {
    let chapter = format!("{} {}", parsed.display_name, parsed.chapter);

    vec![
        format!("What is the main point of this passage in {}?", chapter),
        format!("What does {} reveal about the character of God?", chapter),
        format!("Who was {} first written to, and what were they facing?", chapter),
        format!("Which words or phrases are repeated in {}, and why might they matter?", chapter),
        format!("How does {} fit into the larger story of {}?", chapter, parsed.display_name),
        format!("Is there a promise to hold onto or a command to obey in {}?", chapter),
        format!("What would change this week if you applied {}?", chapter),
        format!("How can you turn {} into a prayer?", chapter),
    ]
}
