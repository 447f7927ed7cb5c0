//! Prompt construction for question generation and topic suggestion.
//!
//! The JSON shape requested here (`q` / `options` / `a`) is the wire
//! contract with the completion provider; the parser in `generator` expects
//! exactly this format.

use std::fmt::Write as _;

/// Longest document excerpt embedded into a prompt, in characters.
pub const PDF_EXCERPT_LIMIT: usize = 3000;

/// How many previously asked questions are surfaced to the model.
pub const ASKED_WINDOW: usize = 10;

pub const QUESTION_SYSTEM_PROMPT: &str = "You are an expert quiz generator. Your specialty is \
creating DIVERSE questions that cover DIFFERENT aspects of a topic. Each question you generate \
must be about a completely different concept or aspect. NEVER repeat similar questions. Return \
ONLY valid JSON format.";

pub const SUGGESTION_SYSTEM_PROMPT: &str = "You are a data analyst that analyzes user behavior \
and generates topic trends. Always respond with valid JSON array only, no extra text.";

/// Richer model-facing descriptions for the stock topics, keyed by exact
/// lowercase topic.
fn topic_enhancement(topic: &str) -> Option<&'static str> {
    match topic {
        "python" => Some(
            "Python programming (syntax, functions, classes, data structures, algorithms, OOP \
             concepts, libraries like pandas/numpy, coding best practices)",
        ),
        "data science" => Some(
            "Data Science and AI (machine learning algorithms, pandas, numpy, statistics, data \
             analysis, neural networks, scikit-learn)",
        ),
        "web development" => Some(
            "Web Development (HTML, CSS, JavaScript, REST APIs, web frameworks, responsive \
             design, frontend/backend)",
        ),
        "cloud computing" => Some(
            "Cloud Computing (AWS, Azure, GCP, serverless architecture, containers, Docker, \
             Kubernetes, cloud services)",
        ),
        "react" => Some(
            "React.js framework (hooks, components, state management, JSX, props, lifecycle, \
             Next.js, TypeScript with React)",
        ),
        "databases" => Some(
            "Databases and SQL (relational databases, SQL queries, NoSQL databases, database \
             design, normalization, optimization, indexes)",
        ),
        _ => None,
    }
}

/// Sub-areas the model is told to spread questions across.
fn question_areas(topic: &str) -> [&'static str; 5] {
    if topic.contains("apple") || topic.contains("fruit") {
        [
            "nutritional value and health benefits",
            "varieties and types",
            "cultivation and growing conditions",
            "history and origin",
            "culinary uses and recipes",
        ]
    } else if topic.contains("python") {
        [
            "basic syntax and data types",
            "functions and control flow",
            "object-oriented programming",
            "popular libraries (pandas, numpy, etc.)",
            "best practices and common patterns",
        ]
    } else {
        [
            "fundamental concepts",
            "practical applications",
            "advanced topics",
            "common use cases",
            "best practices",
        ]
    }
}

/// Unicode-safe prefix truncation by character count.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn previous_questions_block(asked: &[String]) -> String {
    let start = asked.len().saturating_sub(ASKED_WINDOW);
    let recent = &asked[start..];
    if recent.is_empty() {
        return String::new();
    }
    let mut block = String::from("\n\n**IMPORTANT - DO NOT REPEAT THESE QUESTIONS:**\n");
    for question in recent {
        let _ = writeln!(block, "- {question}");
    }
    block.push_str(
        "\nYou MUST generate COMPLETELY DIFFERENT questions that are NOT similar to any of the \
         above.\n",
    );
    block
}

/// Builds the question-generation prompt.
///
/// With document text present, questions are restricted to a bounded excerpt
/// of it; otherwise the topic is enriched from the enhancement table and the
/// diversity area list. Either way the last `ASKED_WINDOW` asked questions
/// and a numeric uniqueness seed are embedded.
#[must_use]
pub fn build_question_prompt(
    topic: &str,
    count: usize,
    asked: &[String],
    pdf_text: Option<&str>,
    seed: i64,
) -> String {
    let previous = previous_questions_block(asked);

    if let Some(pdf_text) = pdf_text {
        let excerpt = truncate_chars(pdf_text, PDF_EXCERPT_LIMIT);
        return format!(
            "Generate exactly {count} UNIQUE and DIVERSE multiple-choice quiz questions based on \
             the following PDF content:\n\n{excerpt}...\n{previous}\n\nIMPORTANT REQUIREMENTS:\n\
             - Generate questions ONLY from the provided PDF content\n\
             - Make each question completely different and unique\n\
             - Use varied question styles and difficulty levels\n\
             - Cover different aspects of the content\n\
             - Each question must have 4 options (A, B, C, D)\n\
             - Only ONE option should be correct\n\
             - Include the correct answer letter\n\n\
             Return ONLY a JSON array in this EXACT format:\n\
             [\n  {{\n    \"q\": \"Question text here?\",\n    \"options\": [\"Option A text\", \
             \"Option B text\", \"Option C text\", \"Option D text\"],\n    \"a\": \"A\"\n  }}\n]\n\n\
             Number of questions: {count}\n\
             Uniqueness seed: {seed}\n\n\
             Generate {count} varied, creative multiple-choice questions now. Return ONLY the \
             JSON array, no other text."
        );
    }

    let enhanced_topic = topic_enhancement(topic).unwrap_or(topic);
    let mut areas_instruction = String::new();
    for (i, area) in question_areas(topic).iter().enumerate() {
        let _ = write!(areas_instruction, "  {}. {area}", i + 1);
        if i < 4 {
            areas_instruction.push('\n');
        }
    }
    let topic_upper = topic.to_uppercase();

    format!(
        "Generate exactly {count} COMPLETELY DIFFERENT multiple-choice quiz questions about \
         {enhanced_topic}.\n{previous}\n\n\
         CRITICAL - QUESTION DIVERSITY RULES:\n\
         - Each question MUST cover a DIFFERENT aspect or concept\n\
         - NO two questions should ask about the same thing\n\
         - Distribute questions across these areas:\n{areas_instruction}\n\
         - Vary the difficulty: mix easy, medium, and challenging questions\n\
         - Use different question formats (definition, application, comparison, analysis)\n\n\
         TOPIC FOCUS:\n\
         - ALL questions must be about {topic_upper} ONLY\n\
         - Stay strictly on topic - do not mix in other subjects\n\n\
         FORMATTING REQUIREMENTS:\n\
         - Each question must have exactly 4 options (A, B, C, D)\n\
         - Only ONE option should be correct per question\n\
         - Make wrong options plausible but clearly incorrect\n\
         - Include the correct answer letter\n\n\
         Return ONLY a JSON array in this EXACT format:\n\
         [\n  {{\n    \"q\": \"Question text here?\",\n    \"options\": [\"Option A\", \
         \"Option B\", \"Option C\", \"Option D\"],\n    \"a\": \"A\"\n  }}\n]\n\n\
         Uniqueness seed: {seed}\n\n\
         Generate {count} DIVERSE questions about DIFFERENT aspects of {enhanced_topic}. Return \
         ONLY the JSON array."
    )
}

/// Builds the topic-suggestion prompt from recent chat titles, already
/// sorted and truncated by the caller.
#[must_use]
pub fn build_suggestion_prompt(titles: &[String]) -> String {
    let chat_context = if titles.is_empty() {
        "No user chat history available. Generate trending topics for 2026.".to_owned()
    } else {
        let mut listing = String::new();
        for title in titles {
            let _ = writeln!(listing, "- {title}");
        }
        format!("\nUser chat data (recent chat titles):\n{listing}")
    };

    format!(
        "Based on the following user chat data, generate a list of EXACTLY 6 \"Most Requested \
         Topics\".\n\n\
         Rules:\n\
         - Generate EXACTLY 6 topics (no more, no less) for balanced UI grid layout\n\
         - Topics must reflect actual user demand and frequency\n\
         - Merge similar topics into a single clear topic\n\
         - Keep topic names short and professional (2-4 words each)\n\
         - Do not include explanations\n\
         - Do not include numbering or emojis\n\
         - Output ONLY a JSON array of exactly 6 strings\n\n\
         User chat data:\n{chat_context}\n\n\
         Example output format (EXACTLY 6 topics):\n\
         [\n  \"Data Science Interviews\",\n  \"Machine Learning Projects\",\n  \"Python \
         Programming\",\n  \"SQL Query Optimization\",\n  \"Cloud Computing\",\n  \"Web \
         Development\"\n]\n\n\
         Generate the JSON array with EXACTLY 6 topics now:"
    )
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
