use crate::cli::OutputSize;
use crate::generate::GenerationRequest;

/// The exact prompt pair sent to the generation API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Build the prompt for a generation request.
///
/// Pure function: no I/O, byte-identical output for identical inputs.
pub fn build(request: &GenerationRequest) -> Prompt {
    let system_instruction = format!(
        r#"ROLE & OBJECTIVE:
You are a Senior Technical Evangelist and Engineering Editor. Your goal is to ingest multiple raw video transcripts, filter out conversational noise, synthesize the technical concepts, and produce a high-impact LinkedIn article. It should be informative and give readers the core concepts. {size_guidance}

YOUR DATA SOURCE:
The transcripts provided by the user contain the source of truth.
Prioritize synthesis: do not summarize one transcript after another. Look for patterns, conflicting opinions, and complementary technical details across all provided transcripts to create a unified narrative.
Ignore fluff: disregard conversational filler (e.g., "Can you hear me?", "Next slide", jokes). Focus purely on architectural details, technical trade-offs, and engineering insights.

CONTENT GUIDELINES:
Fairness is key: when comparing technologies, be objective. Highlight where one tool shines and where another is better. Avoid marketing hype; focus on engineering reality.
Depth: the content must be useful to a technical practitioner. Do not stay on the surface.

OUTPUT FORMATTING (STRICT LINKEDIN STYLE):
The hook: start with a punchy, 1-2 sentence hook. No "In this post" or "Today we discuss". Jump straight into the tension or the value proposition.
Structure:
Use short paragraphs (1-2 sentences max).
Use double line breaks for white-space readability.
Use bullet points for technical comparisons or feature lists.
Tone: professional, insightful, slightly conversational but highly technical.
Emojis: use them to break up text, but do not overdo it.
Engagement: end with a specific question to the audience to drive comments.
Hashtags: 3-5 relevant tags at the very bottom.

IMPORTANT OUTPUT REQUIREMENTS:
1. The article title must be on the first line, prefixed with "TITLE: "
2. The article content must follow after a blank line
3. The final line must be "HASHTAGS: " followed by 3-5 relevant hashtags separated by spaces"#,
        size_guidance = size_guidance(request.output_size),
    );

    let context_block = match request.context.as_deref().map(str::trim) {
        Some(context) if !context.is_empty() => format!(
            "CONTEXT BLOCK:\nTopic: {context}\nAngle: Technical deep-dive with practical insights\nAudience: {audience}\n\n",
            audience = request.audience,
        ),
        _ => String::new(),
    };

    let user_prompt = format!(
        r#"{context_block}Please analyze the following transcripts and generate a LinkedIn article based on the guidelines above:

{transcript}

Remember to:
1. Start your response with "TITLE: " followed by the article title
2. Include the full article content
3. End with "HASHTAGS: " followed by 3-5 relevant hashtags"#,
        transcript = request.transcript.text,
    );

    Prompt {
        system_instruction,
        user_prompt,
    }
}

/// Page-count guidance embedded in the system instruction
fn size_guidance(size: OutputSize) -> &'static str {
    match size {
        OutputSize::Short => "The article should be approximately 1-2 pages long (500-1000 words).",
        OutputSize::Medium => {
            "The article should be approximately 2-4 pages long (1000-2000 words)."
        }
        OutputSize::Long => "The article should be approximately 4-6 pages long (2000-3000 words).",
    }
}
