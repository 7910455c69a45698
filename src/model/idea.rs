use crate::foundation::error::{MemeError, MemeResult};

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label used in prompts and user-facing text.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = MemeError;

            /// Accepts the label or the variant name, case-insensitively.
            fn from_str(s: &str) -> MemeResult<Self> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.label().eq_ignore_ascii_case(wanted)
                            || format!("{v:?}").eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| {
                        MemeError::validation(format!(
                            concat!("unknown ", stringify!($name), " '{}'"),
                            wanted
                        ))
                    })
            }
        }
    };
}

labeled_enum! {
    /// Comedic register of the generated ideas.
    Tone {
        /// Satire of public life.
        Satirical => "Satirical",
        /// Uplifting.
        Motivational => "Motivational",
        /// Dry and mocking.
        Sarcastic => "Sarcastic",
        /// Everyday situations everyone recognizes.
        Relatable => "Relatable",
        /// Politics and politicians.
        Political => "Political",
        /// Deliberately awkward.
        Cringe => "Cringe",
    }
}

labeled_enum! {
    /// Social platform the content targets.
    Platform {
        /// Facebook feed.
        Facebook => "Facebook",
        /// TikTok.
        Tiktok => "TikTok",
        /// Instagram posts and reels.
        Instagram => "Instagram",
        /// Twitter / X.
        Twitter => "Twitter",
    }
}

labeled_enum! {
    /// Audience the humor is tuned for.
    Audience {
        /// Gen Z and young adults.
        Youth => "Youth/GenZ",
        /// Office workers.
        Professionals => "Professionals",
        /// School and college students.
        Students => "Students",
        /// Everybody.
        General => "General Public",
        /// Nepalis living abroad.
        Diaspora => "Nepali Diaspora",
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Relatable
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Instagram
    }
}

impl Default for Audience {
    fn default() -> Self {
        Audience::Youth
    }
}

/// Parameters of one idea-generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdeaRequest {
    /// Free-form topic; must not be blank.
    pub topic: String,
    /// Comedic register.
    pub tone: Tone,
    /// Target platform.
    pub platform: Platform,
    /// Target audience.
    pub audience: Audience,
}

impl IdeaRequest {
    /// Request with default tone, platform and audience.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Reject a blank topic before anything is sent anywhere.
    pub fn validate(&self) -> MemeResult<()> {
        if self.topic.trim().is_empty() {
            return Err(MemeError::validation("topic must not be blank"));
        }
        Ok(())
    }
}

/// Still-meme part of an idea.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeTemplate {
    /// Name of the meme format.
    pub template_name: String,
    /// Top caption.
    pub top_text: String,
    /// Bottom caption (the punchline).
    pub bottom_text: String,
    /// Description of the picture: subject, expression, setting.
    pub visual_style: String,
    /// Suggested hashtags, with or without a leading `#`.
    pub hashtags: Vec<String>,
}

/// Short-video part of an idea.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelsScript {
    /// One-line concept.
    pub concept: String,
    /// Scene-by-scene breakdown.
    pub scenes: Vec<String>,
    /// Spoken lines.
    pub dialogue: String,
    /// Suggested audio track.
    pub audio_suggestion: String,
    /// On-screen text.
    pub text_overlays: String,
}

/// Post captions in three flavors.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Captions {
    /// Funny / sarcastic.
    pub funny: String,
    /// Relatable.
    pub relatable: String,
    /// Deep / thought provoking.
    pub deep: String,
}

/// One generated content idea.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Catchy title.
    pub title: String,
    /// Still meme.
    pub meme_template: MemeTemplate,
    /// Short video script.
    pub reels_script: ReelsScript,
    /// Post captions.
    pub captions: Captions,
}

/// Envelope the idea generator answers with.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdeaBatch {
    /// Generated ideas.
    pub ideas: Vec<Idea>,
}

/// Section of an idea that can be copied as plain text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdeaSection {
    /// Captions and hashtags of the still meme.
    Meme,
    /// Concept, scenes and dialogue of the reel.
    Reels,
    /// The three post captions.
    Captions,
}

impl Idea {
    /// Plain-text rendering of one section, ready for the clipboard.
    pub fn copy_text(&self, section: IdeaSection) -> String {
        match section {
            IdeaSection::Meme => {
                let m = &self.meme_template;
                let tags = m
                    .hashtags
                    .iter()
                    .map(|t| format!("#{}", t.trim_start_matches('#')))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("Top: {}\nBottom: {}\n\n{tags}", m.top_text, m.bottom_text)
            }
            IdeaSection::Reels => {
                let r = &self.reels_script;
                let scenes = r
                    .scenes
                    .iter()
                    .map(|s| format!("- {s}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "Concept: {}\n\nScenes:\n{scenes}\n\nDialogue:\n{}",
                    r.concept, r.dialogue
                )
            }
            IdeaSection::Captions => {
                let c = &self.captions;
                format!(
                    "Funny: {}\n\nRelatable: {}\n\nDeep: {}",
                    c.funny, c.relatable, c.deep
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/idea.rs"]
mod tests;
