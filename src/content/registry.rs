//! Static registry of every content type served under `/api/content/*`.
//!
//! Each entry drives the generic CRUD handlers: which fields a payload may
//! carry, which query parameters filter a listing, and which public pages
//! must be revalidated after a mutation.

/// How documents of a content type behave as a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Ordinary ordered collection (news, partners, ...).
    Collection,
    /// At most one document may be active at a time; activating one
    /// deactivates its siblings.
    SingletonActive,
    /// Exactly one document, written via upsert. Absence is a valid state.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    /// `{ "url": "...", "alt": "..." }`
    Media,
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Enforced on create only; updates are partial.
    pub required: bool,
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Text, required: false }
}

const fn required_text(name: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Text, required: true }
}

const fn integer(name: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Integer, required: false }
}

const fn media(name: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Media, required: false }
}

const fn required_media(name: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Media, required: true }
}

const fn choice(name: &'static str, values: &'static [&'static str]) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Enum(values), required: false }
}

const fn required_choice(name: &'static str, values: &'static [&'static str]) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Enum(values), required: true }
}

#[derive(Debug, Clone, Copy)]
pub struct ContentTypeDef {
    pub slug: &'static str,
    pub kind: ContentKind,
    pub fields: &'static [FieldSpec],
    /// Field names usable as query-string filters on GET.
    pub filters: &'static [&'static str],
    /// Public page paths revalidated after every successful mutation.
    pub revalidate: &'static [&'static str],
}

const NEWS_CATEGORIES: &[&str] = &["press", "announcement", "article"];
const PANEL_CATEGORIES: &[&str] = &["mediator", "arbitrator", "conciliator"];
const PARTNER_CATEGORIES: &[&str] = &["strategic", "knowledge", "media", "institutional"];
const EVENT_TYPES: &[&str] = &["conference", "workshop", "webinar"];
const ACADEMY_PROGRAMS: &[&str] = &["certificate", "diploma", "masterclass"];
const ECOSYSTEM_PARTNER_CATEGORIES: &[&str] = &["institutional", "corporate", "academic"];

pub const CONTENT_TYPES: &[ContentTypeDef] = &[
    ContentTypeDef {
        slug: "hero-slides",
        kind: ContentKind::Collection,
        fields: &[
            required_text("title"),
            text("subtitle"),
            media("image"),
            text("ctaLabel"),
            text("ctaUrl"),
        ],
        filters: &[],
        revalidate: &["/"],
    },
    ContentTypeDef {
        slug: "news",
        kind: ContentKind::Collection,
        fields: &[
            required_text("title"),
            text("slug"),
            text("excerpt"),
            text("body"),
            media("image"),
            choice("category", NEWS_CATEGORIES),
            integer("year"),
        ],
        filters: &["category", "year"],
        revalidate: &["/", "/resources/news"],
    },
    ContentTypeDef {
        slug: "panel-members",
        kind: ContentKind::Collection,
        fields: &[
            required_text("name"),
            text("designation"),
            text("organization"),
            text("bio"),
            media("photo"),
            choice("category", PANEL_CATEGORIES),
        ],
        filters: &["category"],
        revalidate: &["/mediation/panel"],
    },
    ContentTypeDef {
        slug: "partners",
        kind: ContentKind::Collection,
        fields: &[
            required_text("name"),
            required_choice("category", PARTNER_CATEGORIES),
            required_media("logo"),
            text("website"),
        ],
        filters: &["category"],
        revalidate: &["/", "/ecosystem/partners"],
    },
    ContentTypeDef {
        slug: "testimonials",
        kind: ContentKind::Collection,
        fields: &[
            required_text("author"),
            text("designation"),
            required_text("quote"),
            media("photo"),
        ],
        filters: &[],
        revalidate: &["/"],
    },
    ContentTypeDef {
        slug: "events",
        kind: ContentKind::Collection,
        fields: &[
            required_text("title"),
            text("description"),
            text("venue"),
            text("startsOn"),
            text("endsOn"),
            media("image"),
            choice("type", EVENT_TYPES),
            integer("year"),
        ],
        filters: &["type", "year"],
        revalidate: &["/events"],
    },
    ContentTypeDef {
        slug: "mci-event",
        kind: ContentKind::SingletonActive,
        fields: &[
            required_text("title"),
            text("edition"),
            text("venue"),
            text("startsOn"),
            text("endsOn"),
            text("registrationUrl"),
            media("image"),
        ],
        filters: &[],
        revalidate: &["/", "/events/mci"],
    },
    ContentTypeDef {
        slug: "conclave-event",
        kind: ContentKind::SingletonActive,
        fields: &[
            required_text("title"),
            text("edition"),
            text("venue"),
            text("startsOn"),
            text("endsOn"),
            text("registrationUrl"),
            media("image"),
        ],
        filters: &[],
        revalidate: &["/", "/events/conclave"],
    },
    ContentTypeDef {
        slug: "awards-event",
        kind: ContentKind::SingletonActive,
        fields: &[
            required_text("title"),
            text("edition"),
            text("venue"),
            text("startsOn"),
            text("endsOn"),
            text("registrationUrl"),
            media("image"),
        ],
        filters: &[],
        revalidate: &["/", "/events/awards"],
    },
    ContentTypeDef {
        slug: "academy-courses",
        kind: ContentKind::Collection,
        fields: &[
            required_text("title"),
            choice("program", ACADEMY_PROGRAMS),
            text("description"),
            text("duration"),
            media("image"),
        ],
        filters: &["program"],
        revalidate: &["/academy", "/academy/courses"],
    },
    ContentTypeDef {
        slug: "academy-modules",
        kind: ContentKind::Collection,
        fields: &[
            required_text("title"),
            choice("program", ACADEMY_PROGRAMS),
            text("summary"),
            integer("sequence"),
        ],
        filters: &["program"],
        revalidate: &["/academy/courses"],
    },
    ContentTypeDef {
        slug: "academy-faculty",
        kind: ContentKind::Collection,
        fields: &[
            required_text("name"),
            text("designation"),
            text("bio"),
            media("photo"),
        ],
        filters: &[],
        revalidate: &["/academy/faculty"],
    },
    ContentTypeDef {
        slug: "academy-partners",
        kind: ContentKind::Collection,
        fields: &[required_text("name"), media("logo"), text("website")],
        filters: &[],
        revalidate: &["/academy"],
    },
    ContentTypeDef {
        slug: "ecosystem-teams",
        kind: ContentKind::Collection,
        fields: &[
            required_text("name"),
            text("role"),
            media("photo"),
            text("linkedinUrl"),
        ],
        filters: &[],
        revalidate: &["/ecosystem"],
    },
    ContentTypeDef {
        slug: "ecosystem-partners",
        kind: ContentKind::Collection,
        fields: &[
            required_text("name"),
            choice("category", ECOSYSTEM_PARTNER_CATEGORIES),
            media("logo"),
            text("website"),
        ],
        filters: &["category"],
        revalidate: &["/ecosystem/partners"],
    },
    ContentTypeDef {
        slug: "ecosystem-awards",
        kind: ContentKind::Collection,
        fields: &[
            required_text("title"),
            integer("year"),
            text("description"),
            media("image"),
        ],
        filters: &["year"],
        revalidate: &["/ecosystem/awards"],
    },
    ContentTypeDef {
        slug: "ecosystem-signatories",
        kind: ContentKind::Collection,
        fields: &[
            required_text("name"),
            text("organization"),
            text("designation"),
            media("logo"),
        ],
        filters: &[],
        revalidate: &["/ecosystem/pledge"],
    },
    ContentTypeDef {
        slug: "site-settings",
        kind: ContentKind::Config,
        fields: &[
            text("siteTitle"),
            text("tagline"),
            text("contactEmail"),
            text("contactPhone"),
            text("address"),
            media("logo"),
        ],
        filters: &[],
        revalidate: &["/"],
    },
    ContentTypeDef {
        slug: "footer-settings",
        kind: ContentKind::Config,
        fields: &[
            text("aboutText"),
            text("copyright"),
            text("newsletterHeading"),
            text("linkedinUrl"),
            text("twitterUrl"),
            text("youtubeUrl"),
        ],
        filters: &[],
        revalidate: &["/"],
    },
    ContentTypeDef {
        slug: "about-settings",
        kind: ContentKind::Config,
        fields: &[
            text("heading"),
            text("intro"),
            text("mission"),
            text("vision"),
            media("image"),
        ],
        filters: &[],
        revalidate: &["/about"],
    },
];

pub fn lookup(slug: &str) -> Option<&'static ContentTypeDef> {
    CONTENT_TYPES.iter().find(|def| def.slug == slug)
}

impl ContentTypeDef {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
