//! Markdown rendering for chunks.

use crate::model::Chunk;

/// Render chunks as Markdown, one `##` block per chunk.
pub fn to_markdown(chunks: &[Chunk]) -> String {
    let mut output = String::new();

    for chunk in chunks {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("## ");
        output.push_str(chunk.title.trim());
        output.push_str("\n\n");
        output.push_str(chunk.text.trim());
        output.push('\n');
    }

    output
}
