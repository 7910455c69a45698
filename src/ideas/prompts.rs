use crate::model::idea::{IdeaRequest, MemeTemplate};

/// Number of ideas every request asks for.
pub const IDEA_COUNT: usize = 3;

/// Sampling temperature for idea generation.
pub const IDEA_TEMPERATURE: f32 = 0.8;

/// Persona and output rules sent as the system instruction of every idea request.
pub const SYSTEM_INSTRUCTION: &str = r#"You are "MemeBot Nepal", an expert in Nepali meme culture, social media trends, and viral content creation.
Your knowledge is deep and authentic.

Cultural context you know well:
- Famous formats: "Bahun/Bahuney jokes", "Load-shedding nostalgia", "Kathmandu vs. outside valley", "Dhulo/pollution in KTM", "Bihe/marriage pressure", "Exam stress", "MOMO supremacy", "Public bus conductors".
- Language: an authentic mix of Nepali (Devanagari or Romanized), English and "Tanglish" (e.g. "Bro le k bhaneko yesto", "Cringey parale").
- References: local politicians (Balen, Rabi, old netas), viral TikTokers, classic Nepali movie dialogues ("Harke Halwo", "Kabbadi").

Task:
Generate exactly 3 distinct content ideas from the user's parameters.
Keep the humor culturally relevant to Nepal.
Write dialogue and captions in Romanized Nepali so a wider web audience can read them; Devanagari in parentheses is fine when it adds flavor.

Output:
Return strict JSON matching the provided schema.
Do not wrap the output in markdown code fences. Return only the raw JSON object."#;

/// JSON schema (Gemini `responseSchema` dialect) of the idea batch.
pub fn response_schema() -> serde_json::Value {
    let string = |description: Option<&str>| match description {
        Some(d) => serde_json::json!({ "type": "STRING", "description": d }),
        None => serde_json::json!({ "type": "STRING" }),
    };
    let string_list = || serde_json::json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "ideas": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": string(Some("A catchy title for this specific meme idea")),
                        "memeTemplate": {
                            "type": "OBJECT",
                            "properties": {
                                "templateName": string(None),
                                "topText": string(Some("Mix of English/Nepali")),
                                "bottomText": string(Some("Punchline in authentic Nepali humor")),
                                "visualStyle": string(Some(
                                    "Detailed description of the image content, facial expressions, and setting"
                                )),
                                "hashtags": string_list(),
                            },
                            "required": ["templateName", "topText", "bottomText", "visualStyle", "hashtags"],
                        },
                        "reelsScript": {
                            "type": "OBJECT",
                            "properties": {
                                "concept": string(None),
                                "scenes": {
                                    "type": "ARRAY",
                                    "items": { "type": "STRING" },
                                    "description": "Step by step scene breakdown",
                                },
                                "dialogue": string(Some("Dialogue in Nepali (Romanized preferred)")),
                                "audioSuggestion": string(None),
                                "textOverlays": string(None),
                            },
                            "required": ["concept", "scenes", "dialogue", "audioSuggestion", "textOverlays"],
                        },
                        "captions": {
                            "type": "OBJECT",
                            "properties": {
                                "funny": string(None),
                                "relatable": string(None),
                                "deep": string(None),
                            },
                            "required": ["funny", "relatable", "deep"],
                        },
                    },
                    "required": ["title", "memeTemplate", "reelsScript", "captions"],
                },
            },
        },
        "required": ["ideas"],
    })
}

/// User prompt embedding the four request parameters by their display labels.
pub fn idea_prompt(request: &IdeaRequest) -> String {
    format!(
        "Generate viral Nepali content ideas based on:\n\
         Topic: {}\n\
         Tone: {}\n\
         Platform: {}\n\
         Target Audience: {}\n\n\
         Return exactly {IDEA_COUNT} ideas. Make them highly engaging, culturally accurate, and funny.",
        request.topic.trim(),
        request.tone,
        request.platform,
        request.audience,
    )
}

/// Visual description used when turning a generated idea into an image request.
pub fn idea_visual_description(template: &MemeTemplate) -> String {
    format!("{} - {}", template.template_name, template.visual_style)
}

/// Full image-generation prompt: the visual description wrapped in meme style guidelines.
///
/// Captions are drawn by the compositor, so the image itself must never contain text.
pub fn image_prompt(visual_description: &str) -> String {
    format!(
        "Generate a high-quality, funny internet meme template image without text.\n\n\
         Visual Description: {}\n\n\
         Style Guidelines:\n\
         - Art Style: digital art or realistic stock photo style common in viral memes.\n\
         - Facial Expressions: extremely exaggerated and dramatic (shocked, disappointed or sarcastic) to match the humor.\n\
         - Lighting: clear, bright and focused on the subject.\n\
         - Composition: center the subject and leave space at the top and bottom for text overlays.\n\n\
         IMPORTANT: Do NOT include any text, words, or letters inside the image itself. It must be a blank template.",
        visual_description.trim()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/ideas/prompts.rs"]
mod tests;
