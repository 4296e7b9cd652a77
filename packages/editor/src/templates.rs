//! Starter copy presets for the landing page fields

use crate::mutations::Mutation;
use crate::schema::DocumentSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
}

impl Template {
    /// Mutations for the fields the schema knows, plus the ids it doesn't
    pub fn plan(&self, schema: &DocumentSchema) -> (Vec<Mutation>, Vec<String>) {
        let mut mutations = Vec::new();
        let mut skipped = Vec::new();

        for (field_id, value) in self.fields {
            if schema.has_field(field_id) {
                mutations.push(Mutation::set_field(*field_id, *value));
            } else {
                skipped.push(field_id.to_string());
            }
        }

        (mutations, skipped)
    }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        name: "saas",
        description: "B2B SaaS demo booking",
        fields: &[
            ("hero_headline", "SCALE YOUR B2B SALES WITH AI AGENTS"),
            (
                "hero_sub",
                "Book 40-60 qualified demos monthly without hiring SDRs. AI handles \
                 prospecting, follow-ups, and scheduling while you focus on closing.",
            ),
            ("q_who", "B2B SaaS companies at $500K-$5M ARR"),
            ("q_result", "40-60 qualified demos per month"),
            ("q_time", "within 45 days"),
            ("q_without", "hiring SDRs or learning complex tools"),
            ("scarcity_text", "Only 5 spots available this quarter"),
        ],
    },
    Template {
        name: "agency",
        description: "Done-for-you lead generation",
        fields: &[
            ("hero_headline", "DONE-FOR-YOU LEAD GENERATION ENGINE"),
            (
                "hero_sub",
                "Get 30-80 qualified leads monthly while we handle cold email, voice, SMS, \
                 and appointment setting. Fully managed service.",
            ),
            ("q_who", "Service agencies & consultancies"),
            ("q_result", "30-80 qualified leads per month"),
            ("q_time", "in 30 days"),
            ("q_without", "managing outreach or hiring staff"),
            ("scarcity_text", "Limited to 10 active clients per month"),
        ],
    },
    Template {
        name: "ecom",
        description: "Shopify store growth",
        fields: &[
            ("hero_headline", "TRIPLE YOUR SHOPIFY STORE REVENUE"),
            (
                "hero_sub",
                "Convert more visitors into buyers with our proven funnel framework. \
                 Average clients see 3.2x revenue increase in 60 days.",
            ),
            ("q_who", "Shopify store owners doing $10K-$100K/mo"),
            ("q_result", "2-3x revenue increase"),
            ("q_time", "within 60 days"),
            ("q_without", "expensive agencies or tech skills"),
            ("scarcity_text", "Black Friday special - 48 hours only"),
        ],
    },
];

pub fn find_template(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

pub fn template_names() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|t| t.name)
}
