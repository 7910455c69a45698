use crate::foundation::error::{MemeError, MemeResult};

/// One quick-start meme template: an image prompt plus candidate caption pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Template {
    /// Stable lookup key.
    pub id: &'static str,
    /// Human readable name.
    pub display_name: &'static str,
    /// Decorative emoji.
    pub icon: &'static str,
    /// Candidate `(top, bottom)` caption pairs; one is picked at random per use.
    pub captions: &'static [(&'static str, &'static str)],
    /// Visual description sent to the image generator.
    pub prompt: &'static str,
}

/// Every built-in template.
pub static TEMPLATES: &[Template] = &[
    Template {
        id: "momo",
        display_name: "Momo Supremacy",
        icon: "🥟",
        captions: &[
            ("Diet starts Monday", "Momo pasal opens Sunday"),
            ("Pizza? Burger?", "Bro, jhol momo is a personality"),
            ("One plate momo", "Is never one plate"),
        ],
        prompt: "A person staring with dramatic, teary-eyed devotion at a steaming plate of \
                 Nepali momo with achar on a small restaurant table in Kathmandu",
    },
    Template {
        id: "load-shedding",
        display_name: "Load-shedding Nostalgia",
        icon: "🕯️",
        captions: &[
            ("Kids today", "Never studied by candle light"),
            ("18 hours load-shedding", "And we still passed SLC"),
            ("Bijuli gayo", "Whole tole screams at once"),
        ],
        prompt: "A family sitting around a single candle in a dark Nepali living room, a child \
                 doing homework with an exaggerated determined face",
    },
    Template {
        id: "ktm-dhulo",
        display_name: "Dhulo in KTM",
        icon: "😷",
        captions: &[
            ("Went out for 10 minutes", "Came back with a free face pack"),
            ("Kathmandu air quality", "Chill, it's just seasoning"),
            ("White shirt in the morning", "Brown shirt by evening"),
        ],
        prompt: "A commuter covered head to toe in dust on a busy Kathmandu road, squinting \
                 through a haze with a shocked expression, traffic and dust clouds behind",
    },
    Template {
        id: "exam-stress",
        display_name: "Exam Stress",
        icon: "📚",
        captions: &[
            ("Syllabus: 20 chapters", "Me: studied the index"),
            ("Night before board exam", "Now I will start from chapter 1"),
            ("Result aayo", "Ghar ma bhuichalo"),
        ],
        prompt: "A sweating student surrounded by towering piles of textbooks at midnight, \
                 staring at the camera in pure panic under a desk lamp",
    },
    Template {
        id: "bihe-pressure",
        display_name: "Bihe Pressure",
        icon: "💍",
        captions: &[
            ("Relatives at every wedding", "Timro paalo kaile?"),
            ("Turned 25", "Suddenly every aunty is a matchmaker"),
            ("Me: I have a career plan", "Mom: Keti herna jaane ho?"),
        ],
        prompt: "A young person at a colorful Nepali wedding cornered by smiling aunties, \
                 with an awkward forced smile and nervous sweat",
    },
    Template {
        id: "bus-conductor",
        display_name: "Bus Conductor Logic",
        icon: "🚌",
        captions: &[
            ("Bus is completely full", "Conductor: khali chha, bhitra jaanus"),
            ("Asked for change", "Conductor: paachi dinchhu"),
            ("One more passenger", "Physics: not possible. Conductor: possible"),
        ],
        prompt: "A packed Nepali micro bus with passengers squeezed against windows while the \
                 conductor hangs from the door waving for more, comically confident",
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> MemeResult<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.id == id.trim())
        .ok_or_else(|| MemeError::validation(format!("unknown template '{id}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/editor/template.rs"]
mod tests;
