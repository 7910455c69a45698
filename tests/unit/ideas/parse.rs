use super::*;

const ONE_IDEA: &str = r##"{
  "title": "Momo Supremacy",
  "memeTemplate": {
    "templateName": "Drake Hotline Bling",
    "topText": "Pizza",
    "bottomText": "Jhol momo at 9pm",
    "visualStyle": "Man rejecting pizza, pointing happily at steaming momo",
    "hashtags": ["#momo", "#ktm"]
  },
  "reelsScript": {
    "concept": "Friends argue about dinner",
    "scenes": ["Scene 1: menu", "Scene 2: momo arrives"],
    "dialogue": "Bro, momo bina ta khana nai hoina",
    "audioSuggestion": "Trending lofi beat",
    "textOverlays": "POV: momo o'clock"
  },
  "captions": {
    "funny": "Momo is not food, it's an emotion",
    "relatable": "Every plan ends at the momo pasal",
    "deep": "Some loves come in steam"
  }
}"##;

fn batch(n: usize) -> String {
    let ideas = vec![ONE_IDEA; n].join(",");
    format!("{{\"ideas\": [{ideas}]}}")
}

#[test]
fn fences_are_stripped() {
    assert_eq!(strip_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_json_fences("```\n{\"a\":1}```"), "{\"a\":1}");
    assert_eq!(strip_json_fences("  {\"a\":1}  "), "{\"a\":1}");
    assert_eq!(strip_json_fences("```json {\"a\":1}"), "{\"a\":1}");
}

#[test]
fn well_formed_batches_parse() {
    let ideas = parse_idea_batch(&batch(3)).unwrap();
    assert_eq!(ideas.len(), 3);
    assert_eq!(ideas[0].meme_template.bottom_text, "Jhol momo at 9pm");
    assert_eq!(ideas[0].reels_script.scenes.len(), 2);
    assert_eq!(ideas[0].reels_script.audio_suggestion, "Trending lofi beat");
}

#[test]
fn fenced_payloads_parse() {
    let fenced = format!("```json\n{}\n```", batch(3));
    assert_eq!(parse_idea_batch(&fenced).unwrap().len(), 3);
}

#[test]
fn partial_structures_are_rejected_whole() {
    let missing_captions = ONE_IDEA.replace("\"captions\"", "\"notCaptions\"");
    let payload = format!("{{\"ideas\": [{missing_captions}]}}");
    let err = parse_idea_batch(&payload).unwrap_err();
    assert!(err.is_request());
}

#[test]
fn empty_and_garbage_payloads_are_request_errors() {
    assert!(parse_idea_batch("").unwrap_err().is_request());
    assert!(parse_idea_batch("```json\n```").unwrap_err().is_request());
    assert!(parse_idea_batch("sorry, I can't").unwrap_err().is_request());
}
