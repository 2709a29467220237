//! Fixed constant pools drawn from by `generate`. Every pool here is a
//! compile-time constant — the only entropy in persona generation comes
//! from the seeded RNG's choice of index, never from the pools themselves.

pub const FEMALE_NAMES: &[&str] = &[
    "Mara", "Nina", "Sofia", "Lea", "Emma", "Mia", "Lena", "Hannah", "Emily", "Charlotte",
];
pub const MALE_NAMES: &[&str] = &[
    "Alex", "Luca", "Jonas", "Max", "Leon", "Paul", "Elias", "Noah", "Finn", "Ben",
];
pub const NB_NAMES: &[&str] = &[
    "Sam", "Jules", "Robin", "Sascha", "Taylor", "Alexis", "Nico", "Charlie",
];
pub const GENDERS: &[&str] = &["female", "male", "nonbinary"];

pub const CITIES: &[&str] = &[
    "Berlin", "Hamburg", "Koln", "Munchen", "Leipzig", "Dusseldorf", "Stuttgart", "Dresden",
    "Frankfurt", "Bremen",
];
pub const HOMETOWNS: &[&str] = &[
    "Bochum", "Kassel", "Bielefeld", "Rostock", "Nurnberg", "Ulm", "Hannover", "Jena", "Augsburg",
    "Freiburg",
];

pub const JOBS: &[&str] = &[
    "UX researcher",
    "barista",
    "front-end dev",
    "product manager",
    "physio",
    "photographer",
    "nurse",
    "data analyst",
    "teacher",
    "marketing lead",
    "warehouse operator",
    "student",
    "copywriter",
    "data engineer",
    "graphic designer",
    "social media manager",
    "HR coordinator",
    "architect",
    "chef",
    "mechanic",
    "pharmacist",
    "accountant",
    "video editor",
    "translator",
    "recruiter",
    "sales rep",
    "DevOps engineer",
    "legal assistant",
    "personal trainer",
    "event planner",
    "journalist",
    "librarian",
    "dental hygienist",
    "real estate agent",
];
pub const INDUSTRIES: &[&str] = &[
    "tech",
    "healthcare",
    "education",
    "logistics",
    "finance",
    "retail",
    "media",
    "public sector",
    "hospitality",
];
pub const EMPLOYER_TYPES: &[&str] = &[
    "startup", "agency", "corporate", "clinic", "public office", "freelance",
];
pub const SCHEDULES: &[&str] = &["early riser", "standard 9-5", "night owl"];

pub const MICRO_TODAY: &[&str] = &[
    "spilled coffee earlier",
    "bike tire was flat",
    "friend's birthday later",
    "rushed morning standup",
    "gym after work",
    "meal prepping tonight",
    "laundry mountain waiting",
    "dentist appointment later",
    "package arriving today",
    "car needs inspection soon",
    "meeting ran overtime",
    "forgot lunch at home",
    "train was delayed",
    "found 5 euros on street",
    "neighbor's dog was loud",
    "wifi went down earlier",
    "new episode dropped",
    "plants needed watering",
    "trying new recipe tonight",
    "sister called earlier",
    "lost earbuds somewhere",
    "ordered pizza for dinner",
    "finished book yesterday",
    "apartment viewing tomorrow",
    "team won last night",
    "haircut this weekend",
    "deadline approaching",
    "roommate left dishes",
    "forgot umbrella again",
    "keys were missing",
    "elevator broken today",
    "got text from ex",
    "need groceries badly",
    "ran into old friend",
    "phone battery dying",
    "coffee machine broke",
    "printer jammed again",
    "cat knocked over plant",
];

pub const HOBBIES: &[&str] = &[
    "bouldering",
    "running 5k",
    "cycling",
    "yoga",
    "reading thrillers",
    "console gaming",
    "football on Sundays",
    "cooking ramen",
    "photography",
    "cinema nights",
    "coffee nerd stuff",
    "hiking",
    "board games",
    "baking",
    "thrifting",
    "vinyl digging",
    "tennis",
    "swimming",
    "gardening",
    "sketching",
    "guitar practice",
    "podcasts",
    "chess online",
    "standup comedy",
    "language learning",
    "crossfit",
    "DJing",
    "coding side projects",
    "pottery classes",
    "rock climbing",
    "meal prep",
    "urban exploring",
    "film photography",
    "indie concerts",
    "trivia nights",
    "volunteering",
    "skateboarding",
    "boxing",
    "journaling",
    "fermenting",
    "origami",
    "mixology",
    "calligraphy",
    "astronomy",
];

pub const MUSIC: &[&str] = &[
    "indie", "electro", "hip hop", "pop", "rock", "lofi", "jazz", "techno", "folk", "r&b",
    "metal", "classical", "punk",
];
pub const FOOD: &[&str] = &[
    "ramen", "pasta", "tacos", "salads", "curry", "falafel", "pizza", "kumpir", "sushi",
    "dim sum", "pho", "burgers", "dumplings", "shawarma",
];
pub const PETS: &[&str] = &[
    "cat",
    "dog",
    "no pets",
    "plants count",
    "fish tank",
    "bird",
    "thinking about getting one",
];
pub const SOFT_OPINIONS: &[&str] = &[
    "pineapple on pizza is fine",
    "meetings should be emails",
    "night buses are underrated",
    "sunny cold days beat rainy warm ones",
    "decaf is a scam",
    "paper books beat ebooks sometimes",
    "breakfast is overrated",
    "standing desks changed everything",
    "cold brew beats espresso",
    "subtitled movies are better",
    "winter beats summer",
    "cereal is a soup",
    "hot dogs are sandwiches",
    "GIFs are the best replies",
    "voice messages are annoying",
    "typing is faster than talking",
    "morning people are suspicious",
    "podcasts at 1.5x speed",
    "tabs beat spaces",
    "light mode hurts",
    "cilantro tastes like soap",
    "mint chocolate is weird",
    "ketchup on fries is basic",
    "pumpkin spice is good",
    "comic sans isn't that bad",
    "NFTs make no sense",
    "dogs beat cats obviously",
    "cats beat dogs obviously",
    "remote work forever",
    "office has its perks",
];

pub const TEXTING_STYLES: &[&str] = &[
    "dry humor, concise",
    "warm tone, lowercase start",
    "short replies, occasional emoji",
    "light sarcasm, contractions",
    "enthusiastic, a bit bubbly",
    "matter-of-fact, chill",
    "thoughtful pauses",
    "playful teasing",
    "genuine curiosity",
    "understated wit",
    "casual philosophizing",
    "deadpan delivery",
    "expressive punctuation",
    "minimalist responses",
    "overthinking everything",
    "relaxed storyteller",
    "self-deprecating humor",
    "enthusiastic oversharer",
];

pub const SLANG_SETS: &[&[&str]] = &[
    &["lol", "haha"],
    &["digga"],
    &["bro"],
    &["mate"],
    &["bruh"],
    &[],
];

pub const DIALECTS: &[&str] = &[
    "Standarddeutsch",
    "leichter Berliner Slang",
    "Kolsch-Note",
    "Hochdeutsch",
    "Denglisch",
    "English-first, understands German",
];

pub const EMOJI_BUNDLES: &[&[&str]] = &[&[], &[], &[], &["🙂"], &["😅"], &["👍"], &[]];

pub const LAUGHTER_OPTS: &[&str] = &["lol", "haha", "", "", ""];

pub const VIBES: &[&str] = &["smart", "cool", "witty", "grounded", "curious", "chill"];

pub const FILLER_WORD_POOL: &[&str] = &["tbh", "ngl", "eig.", "halt", "so", "like", "uh", "um"];

pub const GUARDRAILS: &[&str] = &[
    "no encyclopedic facts or exact stats",
    "no system/model talk",
    "no time-stamped factual claims",
];
