use super::*;
use crate::model::idea::{Audience, Platform, Tone};

#[test]
fn idea_prompt_embeds_all_labels() {
    let request = IdeaRequest {
        topic: "  Kathmandu traffic ".to_owned(),
        tone: Tone::Sarcastic,
        platform: Platform::Tiktok,
        audience: Audience::Diaspora,
    };
    let prompt = idea_prompt(&request);
    assert!(prompt.contains("Topic: Kathmandu traffic\n"));
    assert!(prompt.contains("Tone: Sarcastic"));
    assert!(prompt.contains("Platform: TikTok"));
    assert!(prompt.contains("Target Audience: Nepali Diaspora"));
    assert!(prompt.contains("exactly 3 ideas"));
}

#[test]
fn schema_requires_every_section() {
    let schema = response_schema();
    assert_eq!(schema["required"], serde_json::json!(["ideas"]));
    let item = &schema["properties"]["ideas"]["items"];
    assert_eq!(
        item["required"],
        serde_json::json!(["title", "memeTemplate", "reelsScript", "captions"])
    );
    assert_eq!(
        item["properties"]["memeTemplate"]["properties"]["hashtags"]["items"]["type"],
        "STRING"
    );
    assert_eq!(
        item["properties"]["reelsScript"]["required"]
            .as_array()
            .map(Vec::len),
        Some(5)
    );
}

#[test]
fn image_prompt_forbids_text() {
    let template = MemeTemplate {
        template_name: "Distracted Boyfriend".to_owned(),
        visual_style: "guy staring at a momo stall".to_owned(),
        ..MemeTemplate::default()
    };
    let description = idea_visual_description(&template);
    assert_eq!(description, "Distracted Boyfriend - guy staring at a momo stall");

    let prompt = image_prompt(&description);
    assert!(prompt.contains("Visual Description: Distracted Boyfriend - guy staring"));
    assert!(prompt.contains("Do NOT include any text"));
}

#[test]
fn system_instruction_sets_the_persona() {
    assert!(SYSTEM_INSTRUCTION.contains("MemeBot Nepal"));
    assert!(SYSTEM_INSTRUCTION.contains("exactly 3"));
}
