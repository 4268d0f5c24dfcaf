//! User-prompt builders, one per task.

use crate::requests::{
    ConversationTurn, DetectToneRequest, GenerateRequest, SuggestRequest, SyncNotesRequest,
    DEFAULT_TONES,
};

pub fn generate(request: &GenerateRequest, cleaned_notes: &str) -> String {
    let mut prompt = format!(
        "FROM: {}\nTO: {}\nTONE: {}\nLENGTH: {}\nOUTPUT LANGUAGE: {}\n\nROUGH NOTES / KEY POINTS:\n{}\n",
        or_placeholder(&request.sender, "[Sender Name]"),
        or_placeholder(&request.recipient, "[Recipient Name]"),
        or_placeholder(&request.tone, "Professional"),
        request.length.unwrap_or_default(),
        or_placeholder(&request.language, "English"),
        cleaned_notes,
    );

    if let Some(example) = non_empty(&request.style_example) {
        prompt.push_str(&format!(
            "\nSTYLE REFERENCE (Mimic this writing style): {}\n",
            example
        ));
    }
    prompt
}

pub fn refine(rough_notes: &str, feedback: &str, history: &[ConversationTurn]) -> String {
    // Only the user's side of the conversation is useful context here.
    let previous: Vec<String> = history
        .iter()
        .filter(|turn| turn.role == "user")
        .map(|turn| format!("- User: {}", turn.text))
        .collect();

    let history_context = if previous.is_empty() {
        String::new()
    } else {
        format!("\n\nPREVIOUS CONVERSATION:\n{}", previous.join("\n"))
    };

    format!(
        "CURRENT ROUGH NOTES:\n{}{}\n\nLATEST USER FEEDBACK/REQUEST:\n{}\n",
        rough_notes, history_context, feedback
    )
}

pub fn suggest(request: &SuggestRequest) -> String {
    let mut prompt = format!(
        "Context: {}\nRecipient: {}\nRequested Tone: {}\nRequested Length: {}\n\nRough Notes:\n{}\n",
        or_placeholder(&request.context, "General Letter"),
        or_placeholder(&request.recipient, "Unknown"),
        or_placeholder(&request.tone, "Not specified"),
        request
            .length
            .map(|l| l.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
        request.rough_notes,
    );

    if let Some(example) = non_empty(&request.style_example) {
        prompt.push_str(&format!("\nStyle Context/Match: {}\n", example));
    }

    prompt.push_str(&format!(
        "\nGenerated Draft:\n{}\n",
        or_placeholder(&request.generated_letter, "(No draft generated yet)")
    ));
    prompt
}

pub fn recommend_length(rough_notes: &str) -> String {
    format!("Rough Notes:\n{}", rough_notes)
}

pub fn sync_notes(request: &SyncNotesRequest) -> String {
    format!(
        "Current Rough Notes:\n{}\n\nEdited Letter:\n{}",
        request.rough_notes, request.edited_letter
    )
}

pub fn detect_tone(request: &DetectToneRequest) -> String {
    let tones = if request.existing_tones.is_empty() {
        DEFAULT_TONES.join(", ")
    } else {
        request.existing_tones.join(", ")
    };

    format!(
        "User message: \"{}\"\n\nExisting available tones: {}\n\nIs the user requesting a tone change? If yes, return the matching existing tone or a new tone name. If no, return empty string.",
        request.message, tones
    )
}

pub fn match_suggestions(chat_input: &str, suggestions: &[String]) -> String {
    let numbered: Vec<String> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i, s))
        .collect();

    format!(
        "Chat Message: \"{}\"\n\nSuggestions:\n{}\n\nReturn a JSON array of matched indices.",
        chat_input,
        numbered.join("\n")
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    non_empty(value).unwrap_or(placeholder)
}
