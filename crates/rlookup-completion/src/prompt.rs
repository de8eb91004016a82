use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

const RESPONSE_TEMPLATE: &str = "\
**Word** (Pronunciation) *Part of Speech*

Definition in {language}

*An example sentence in {language} using the word*

Etymology: a brief explanation of the word's origin.

Alternatives: other words in {language} with a similar meaning, one per line";

const ENGLISH_INSTRUCTIONS: &str = "\
Using language: {language}. You are a reverse dictionary. You will be given a description of a \
single word in English. Suggest the one word in {language} that best matches the description. \
Reply in Markdown using exactly this layout:

{template}

The whole reply must be in {language}. Use line breaks so each part is easy to read.

For example:

**Laziness** (ˈleɪzinəs) *noun*

The state of being unwilling to work or use energy.

*I blamed my laziness on the hot weather.*

Etymology: from \"lazy\", of uncertain origin, possibly from Middle Low German \"lasich\" (feeble).

Alternatives: Idleness, Sloth, Lethargy";

const TRANSLATED_INSTRUCTIONS: &str = "\
Using language: {language}. You are a reverse dictionary for {language}. You will be given a \
description of a single word in English. Suggest the one word in {language} that best matches \
the description. Reply in Markdown using exactly this layout:

{template}

The whole reply must be in {language}. Do not include English translations or words from any \
other language. Use line breaks so each part is easy to read.

For example, a reply for the Nepali language could be:

**आलस्य** (ālasya) *नाम*

काम गर्न मन नलाग्ने वा शक्ति नभएको अवस्था।

*मलाई आज आलस्य छ।*

व्युत्पत्ति: संस्कृत शब्द \"आलस्य\" बाट आएको।

वैकल्पिकहरू: सुस्ती, अकर्मण्यता, निष्क्रियता";

/// System instruction for a lookup in `language`
pub fn system_instruction(language: &str) -> String {
    let instructions = if language == "English" {
        ENGLISH_INSTRUCTIONS
    } else {
        TRANSLATED_INSTRUCTIONS
    };

    instructions
        .replace("{template}", RESPONSE_TEMPLATE)
        .replace("{language}", language)
}

/// Messages for a reverse lookup of `prompt` in `language`
pub fn build_messages(prompt: &str, language: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: Role::System,
            content: system_instruction(language),
        },
        ChatMessage {
            role: Role::User,
            content: prompt.to_string(),
        },
    ]
}
