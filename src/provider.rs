//! Realistic-value provider behind the synthetic generator.
//!
//! The generator never reaches for a global data source: callers inject a
//! [`RealisticDataProvider`] so tests can substitute a canned one. The
//! built-in [`WordListProvider`] draws from small static word lists using
//! the caller's RNG.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// One plausible value per semantic category. Distributions are
/// unspecified; equality-based tests must not depend on exact output.
pub trait RealisticDataProvider {
    fn first_name(&self, rng: &mut dyn RngCore, gender: Option<Gender>) -> String;
    fn last_name(&self, rng: &mut dyn RngCore) -> String;
    fn full_name(&self, rng: &mut dyn RngCore, gender: Option<Gender>) -> String {
        format!("{} {}", self.first_name(rng, gender), self.last_name(rng))
    }
    fn company(&self, rng: &mut dyn RngCore) -> String;
    fn job_title(&self, rng: &mut dyn RngCore) -> String;
    fn phone(&self, rng: &mut dyn RngCore) -> String;
    fn street(&self, rng: &mut dyn RngCore) -> String;
    fn city(&self, rng: &mut dyn RngCore) -> String;
    fn state(&self, rng: &mut dyn RngCore) -> String;
    fn zip_code(&self, rng: &mut dyn RngCore) -> String;
    fn country(&self, rng: &mut dyn RngCore) -> String;
    fn address(&self, rng: &mut dyn RngCore) -> String {
        format!(
            "{}, {}, {} {}",
            self.street(rng),
            self.city(rng),
            self.state(rng),
            self.zip_code(rng)
        )
    }
    fn product_name(&self, rng: &mut dyn RngCore) -> String;
    fn color(&self, rng: &mut dyn RngCore) -> String;
    fn paragraph(&self, rng: &mut dyn RngCore) -> String;
}

const MALE_FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Steven", "Andrew", "Paul", "Joshua",
    "Kevin", "Brian",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah",
    "Karen", "Lisa", "Nancy", "Betty", "Margaret", "Sandra", "Ashley", "Emily", "Donna", "Amanda",
    "Michelle",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson",
];

const COMPANY_STEMS: &[&str] = &[
    "Apex", "Summit", "Pioneer", "Cascade", "Horizon", "Vertex", "Quantum", "Sterling", "Beacon",
    "Evergreen", "Northwind", "Silverline", "Granite", "Bluepeak", "Ironwood",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Industries", "Solutions", "Systems", "Group", "Labs", "Holdings", "Partners", "Logistics",
    "Dynamics", "Ventures",
];

const JOB_AREAS: &[&str] = &[
    "Marketing", "Sales", "Product", "Engineering", "Operations", "Finance", "Support",
    "Research", "Design", "Data",
];

const JOB_ROLES: &[&str] = &[
    "Manager", "Director", "Analyst", "Specialist", "Coordinator", "Engineer", "Consultant",
    "Associate", "Lead", "Administrator",
];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park", "Pine", "Main",
    "Walnut", "Chestnut", "Spring", "River", "Sunset",
];

const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Blvd", "Dr", "Ln", "Rd", "Way", "Ct"];

const CITIES: &[&str] = &[
    "Springfield", "Riverton", "Fairview", "Franklin", "Greenville", "Bristol", "Clinton",
    "Salem", "Madison", "Georgetown", "Arlington", "Ashland", "Burlington", "Dover", "Hudson",
];

const STATES: &[&str] = &[
    "AL", "AZ", "CA", "CO", "FL", "GA", "IL", "IN", "MA", "MI", "MN", "NC", "NJ", "NY", "OH",
    "OR", "PA", "TN", "TX", "VA", "WA", "WI",
];

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "United Kingdom", "Germany", "France", "Spain", "Italy",
    "Netherlands", "Sweden", "Norway", "Australia", "New Zealand", "Japan", "Brazil", "Mexico",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Sleek", "Rustic", "Ergonomic", "Compact", "Durable", "Modern", "Classic", "Portable",
    "Premium", "Handcrafted",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Wooden", "Steel", "Cotton", "Granite", "Leather", "Bamboo", "Ceramic", "Aluminum",
];

const PRODUCT_ITEMS: &[&str] = &[
    "Chair", "Table", "Lamp", "Keyboard", "Bottle", "Backpack", "Notebook", "Speaker", "Mug",
    "Desk", "Clock", "Wallet",
];

const COLORS: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "indigo", "violet", "teal", "maroon", "navy",
    "olive", "silver", "coral", "turquoise",
];

const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip",
    "commodo",
];

fn pick<'a>(rng: &mut dyn RngCore, items: &'a [&str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Default provider backed by static word lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordListProvider;

impl RealisticDataProvider for WordListProvider {
    fn first_name(&self, rng: &mut dyn RngCore, gender: Option<Gender>) -> String {
        let pool = match gender {
            Some(Gender::Male) => MALE_FIRST_NAMES,
            Some(Gender::Female) => FEMALE_FIRST_NAMES,
            None => {
                if rng.gen_bool(0.5) {
                    MALE_FIRST_NAMES
                } else {
                    FEMALE_FIRST_NAMES
                }
            }
        };
        pick(rng, pool).to_string()
    }

    fn last_name(&self, rng: &mut dyn RngCore) -> String {
        pick(rng, LAST_NAMES).to_string()
    }

    fn company(&self, rng: &mut dyn RngCore) -> String {
        format!("{} {}", pick(rng, COMPANY_STEMS), pick(rng, COMPANY_SUFFIXES))
    }

    fn job_title(&self, rng: &mut dyn RngCore) -> String {
        format!("{} {}", pick(rng, JOB_AREAS), pick(rng, JOB_ROLES))
    }

    fn phone(&self, rng: &mut dyn RngCore) -> String {
        format!(
            "({}) {}-{:04}",
            rng.gen_range(200..1000),
            rng.gen_range(200..1000),
            rng.gen_range(0..10000)
        )
    }

    fn street(&self, rng: &mut dyn RngCore) -> String {
        format!(
            "{} {} {}",
            rng.gen_range(100..10000),
            pick(rng, STREET_NAMES),
            pick(rng, STREET_SUFFIXES)
        )
    }

    fn city(&self, rng: &mut dyn RngCore) -> String {
        pick(rng, CITIES).to_string()
    }

    fn state(&self, rng: &mut dyn RngCore) -> String {
        pick(rng, STATES).to_string()
    }

    fn zip_code(&self, rng: &mut dyn RngCore) -> String {
        format!("{:05}", rng.gen_range(10000..100000))
    }

    fn country(&self, rng: &mut dyn RngCore) -> String {
        pick(rng, COUNTRIES).to_string()
    }

    fn product_name(&self, rng: &mut dyn RngCore) -> String {
        format!(
            "{} {} {}",
            pick(rng, PRODUCT_ADJECTIVES),
            pick(rng, PRODUCT_MATERIALS),
            pick(rng, PRODUCT_ITEMS)
        )
    }

    fn color(&self, rng: &mut dyn RngCore) -> String {
        pick(rng, COLORS).to_string()
    }

    fn paragraph(&self, rng: &mut dyn RngCore) -> String {
        let sentence_count = rng.gen_range(3..=5);
        let mut sentences = Vec::with_capacity(sentence_count);
        for _ in 0..sentence_count {
            let word_count = rng.gen_range(6..=12);
            let mut words: Vec<&str> = (0..word_count).map(|_| pick(rng, LOREM_WORDS)).collect();
            let mut sentence = String::new();
            if let Some(first) = words.first_mut() {
                let mut chars = first.chars();
                if let Some(head) = chars.next() {
                    sentence.push(head.to_ascii_uppercase());
                    sentence.push_str(chars.as_str());
                }
            }
            for word in words.iter().skip(1) {
                sentence.push(' ');
                sentence.push_str(word);
            }
            sentence.push('.');
            sentences.push(sentence);
        }
        sentences.join(" ")
    }
}
