//! Static marketing copy for the landing page

pub struct Step {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const HERO_TITLE: &str = "Sell Your Home Fast, Fair, and Simple";

pub const HERO_SUBTITLE: &str =
    "We buy houses in any condition. No repairs, no fees, no hassle. Get a fair cash offer in 24 hours.";

pub const STEPS: &[Step] = &[
    Step {
        title: "Submit Your Property",
        description: "Fill out our simple form with your property details and we'll reach out within 24 hours.",
    },
    Step {
        title: "Get a Fair Offer",
        description: "Receive a competitive cash offer based on current market value and property condition.",
    },
    Step {
        title: "Close the Deal",
        description: "Choose your closing date and we'll handle all the paperwork for a hassle-free transaction.",
    },
];

pub const FAQS: &[Faq] = &[
    Faq {
        question: "How quickly can you buy my house?",
        answer: "We can close in as little as 7 days or on your timeline. You choose the closing date that works best for you.",
    },
    Faq {
        question: "Do I need to make repairs before selling?",
        answer: "No! We buy houses in any condition. You don't need to spend money on repairs, cleaning, or staging.",
    },
    Faq {
        question: "Are there any fees or commissions?",
        answer: "No hidden fees or commissions. The offer you receive is the amount you'll get at closing.",
    },
    Faq {
        question: "What types of properties do you buy?",
        answer: "We buy all types of residential properties including single-family homes, condos, townhouses, and multi-family properties.",
    },
    Faq {
        question: "How do you determine your offer price?",
        answer: "Our offers are based on the property's location, condition, needed repairs, and current market value in your area.",
    },
];

pub const FOOTER_TAGLINE: &str =
    "We buy houses fast for cash. No fees, no commissions, no hassle. Get your fair offer today.";

pub const CONTACT_INFO: &[&str] = &["(555) 123-4567", "info@bhinvestment.com", "123 Business Ave, Suite 100"];

pub const OFFER_DISCLAIMER: &str = "By submitting the form you consent to receive marketing text messages at the number provided. Consent is not a condition of purchase. Reply STOP to unsubscribe.";
