use super::{Category, Priority};

/// Static definition of a clinical test signature
pub struct EntryDef {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub patterns: &'static [&'static str],
    pub category: Category,
    pub priority: Priority,
}

/// Physical examination tests commonly declared in medico-legal examinations
pub const BUILTIN_ENTRIES: &[EntryDef] = &[
    // Orthopedic
    EntryDef {
        label: "range_of_motion",
        keywords: &[
            "range of motion",
            "rom",
            "flexion",
            "extension",
            "limited",
            "measured in degrees",
            "restricted",
        ],
        patterns: &[
            r"range\s+of\s+motion\s+(?:was\s+)?measured",
            r"(?:flexion|extension)\s+(?:were|was)\s+limited",
            r"rom\s+(?:is\s+)?restricted",
            r"limited\s+(?:in\s+)?all\s+planes",
        ],
        category: Category::Orthopedic,
        priority: Priority::High,
    },
    EntryDef {
        label: "straight_leg_raise",
        keywords: &[
            "straight leg raise",
            "slr",
            "positive at",
            "negative straight",
            "lasegue",
        ],
        patterns: &[
            r"straight\s+leg\s+raise\s+(?:was\s+)?positive",
            r"slr\s+(?:positive|negative)",
            r"negative\s+straight[-\s]leg\s+raise",
        ],
        category: Category::Orthopedic,
        priority: Priority::High,
    },
    EntryDef {
        label: "cross_straight_leg_raise",
        keywords: &["crossed straight", "contralateral", "well leg raise", "opposite leg"],
        patterns: &[
            r"crossed\s+straight[-\s]leg\s+raise",
            r"contralateral\s+slr",
            r"well\s+leg\s+raise",
            r"positive\s+(?:well\s+leg|contralateral)",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "faber_test",
        keywords: &["faber", "patrick", "figure-4", "si joint", "hip pain"],
        patterns: &[r"faber\s+test", r"patrick['s]*\s+test", r"figure[-\s]4\s+position"],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "spurlings_test",
        keywords: &["spurling", "foraminal compression", "radicular pain", "neck"],
        patterns: &[
            r"spurling['s]*\s+(?:test|maneuver)",
            r"foraminal\s+compression",
            r"radicular\s+pain",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "drop_arm_test",
        keywords: &["drop arm", "rotator cuff", "lower the arm", "90° abduction"],
        patterns: &[
            r"drop\s+arm\s+test",
            r"unable\s+to\s+(?:smoothly\s+)?lower\s+(?:the\s+)?arm",
            r"arm\s+drops?\s+suddenly",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "hawkins_kennedy_test",
        keywords: &["hawkins", "kennedy", "impingement", "shoulder pain", "internally rotate"],
        patterns: &[
            r"hawkins[-\s]kennedy\s+test",
            r"hawkins\s+impingement",
            r"internal(?:ly)?\s+rotat(?:e|ion)",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "neer_test",
        keywords: &["neer", "impingement", "forward flexion", "overhead"],
        patterns: &[
            r"neer['s]*\s+(?:test|sign)",
            r"neer\s+impingement",
            r"forced\s+forward\s+flexion",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "lachman_test",
        keywords: &["lachman", "acl", "anterior translation", "soft endpoint", "knee"],
        patterns: &[
            r"lachman\s+test",
            r"acl\s+(?:tear|laxity)",
            r"anterior\s+translation",
            r"soft\s+endpoint",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "mcmurray_test",
        keywords: &["mcmurray", "meniscus", "click", "knee", "joint line"],
        patterns: &[
            r"mcmurray['s]*\s+test",
            r"meniscal\s+tear",
            r"click\s+(?:in\s+)?(?:the\s+)?knee",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "phalens_test",
        keywords: &["phalen", "carpal tunnel", "wrist flexion", "tingling", "fingers"],
        patterns: &[
            r"phalen['s]*\s+(?:test|maneuver)",
            r"carpal\s+tunnel",
            r"wrist\s+flexion",
            r"tingling\s+(?:in\s+)?fingers",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "tinels_sign",
        keywords: &["tinel", "tapping", "nerve", "tingling", "pins and needles"],
        patterns: &[
            r"tinel['s]*\s+sign",
            r"tapping\s+over\s+(?:the\s+)?(?:median|ulnar)\s+nerve",
            r"pins\s+and\s+needles",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "trendelenburg_sign",
        keywords: &["trendelenburg", "pelvic drop", "hip abductor", "one leg"],
        patterns: &[
            r"trendelenburg\s+sign",
            r"pelvic\s+drop",
            r"standing\s+on\s+one\s+leg",
        ],
        category: Category::Orthopedic,
        priority: Priority::Medium,
    },
    // Neurological
    EntryDef {
        label: "deep_tendon_reflexes",
        keywords: &[
            "deep tendon",
            "dtr",
            "reflex",
            "patellar",
            "achilles",
            "biceps",
            "triceps",
            "2+",
            "brisk",
            "absent",
        ],
        patterns: &[
            r"deep\s+tendon\s+reflex(?:es)?",
            r"dtr[s]*",
            r"(?:patellar|achilles|biceps|triceps)\s+reflex",
            r"reflex(?:es)?\s+(?:\d\+|brisk|absent|diminished)",
        ],
        category: Category::Neurological,
        priority: Priority::High,
    },
    EntryDef {
        label: "babinski_sign",
        keywords: &["babinski", "plantar response", "upgoing toe", "downgoing", "extensor"],
        patterns: &[
            r"babinski\s+sign",
            r"plantar\s+response",
            r"(?:upgoing|downgoing)\s+toe",
            r"extensor\s+plantar",
        ],
        category: Category::Neurological,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "hoffmanns_sign",
        keywords: &["hoffmann", "flick", "middle finger", "thumb flexion", "cervical"],
        patterns: &[
            r"hoffmann['s]*\s+(?:sign|reflex)",
            r"flick(?:ing)?\s+(?:the\s+)?middle\s+finger",
        ],
        category: Category::Neurological,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "clonus_test",
        keywords: &["clonus", "ankle", "sustained", "beats", "rhythmic"],
        patterns: &[
            r"clonus\s+(?:present|noted|absent)",
            r"sustained\s+clonus",
            r"beats\s+of\s+clonus",
        ],
        category: Category::Neurological,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "romberg_test",
        keywords: &["romberg", "balance", "eyes closed", "sway", "proprioception"],
        patterns: &[
            r"romberg\s+(?:test|sign)",
            r"balance\s+with\s+eyes\s+closed",
            r"increased\s+sway",
        ],
        category: Category::Neurological,
        priority: Priority::Medium,
    },
    // Sensory
    EntryDef {
        label: "light_touch_sensation",
        keywords: &["light touch", "sensation", "intact", "decreased", "dermatome"],
        patterns: &[
            r"light\s+touch\s+sensation",
            r"sensation\s+(?:is\s+)?intact",
            r"decreased\s+(?:light\s+)?touch",
        ],
        category: Category::Sensory,
        priority: Priority::High,
    },
    EntryDef {
        label: "pinprick_sensation",
        keywords: &["pinprick", "sharp", "dull", "pin sensation", "discrimination"],
        patterns: &[
            r"pinprick\s+sensation",
            r"sharp[/\s]dull",
            r"pin\s+sensation",
            r"sharp[/\s]dull\s+discrimination",
        ],
        category: Category::Sensory,
        priority: Priority::High,
    },
    EntryDef {
        label: "vibration_sense",
        keywords: &["vibration", "tuning fork", "vibratory", "great toe", "malleolus"],
        patterns: &[r"vibration\s+sense", r"vibratory\s+sensation", r"tuning\s+fork"],
        category: Category::Sensory,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "proprioception",
        keywords: &["proprioception", "joint position", "position sense", "up or down"],
        patterns: &[
            r"proprioception\s+test",
            r"joint\s+position\s+sense",
            r"position\s+sense",
        ],
        category: Category::Sensory,
        priority: Priority::Medium,
    },
    // Functional
    EntryDef {
        label: "gait_observation",
        keywords: &["gait", "antalgic", "limping", "walking", "stride", "assistive device"],
        patterns: &[
            r"gait\s+(?:was|is)\s+(?:antalgic|normal|abnormal)",
            r"limp(?:ing)?\s+noted",
            r"walking\s+(?:with|without)\s+(?:assistive\s+)?device",
        ],
        category: Category::Functional,
        priority: Priority::High,
    },
    EntryDef {
        label: "heel_walking",
        keywords: &["heel walk", "walk on heels", "dorsiflexor", "tibialis anterior"],
        patterns: &[
            r"heel\s+walk(?:ing)?",
            r"walk(?:ing)?\s+on\s+heels",
            r"(?:able|unable)\s+to\s+walk\s+on\s+heels",
        ],
        category: Category::Functional,
        priority: Priority::High,
    },
    EntryDef {
        label: "toe_walking",
        keywords: &["toe walk", "walk on toes", "plantarflexor", "calf", "tiptoes"],
        patterns: &[
            r"toe\s+walk(?:ing)?",
            r"walk(?:ing)?\s+on\s+toes",
            r"(?:able|unable)\s+to\s+walk\s+on\s+toes",
            r"tiptoes",
        ],
        category: Category::Functional,
        priority: Priority::High,
    },
    EntryDef {
        label: "tandem_gait",
        keywords: &["tandem", "heel-to-toe", "balance", "straight line"],
        patterns: &[
            r"tandem\s+(?:gait|walk)",
            r"heel[-\s]to[-\s]toe",
            r"walk(?:ing)?\s+(?:in\s+)?(?:a\s+)?straight\s+line",
        ],
        category: Category::Functional,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "sit_to_stand",
        keywords: &["sit to stand", "rise from", "seated position", "chair", "arm support"],
        patterns: &[
            r"sit[-\s]to[-\s]stand",
            r"ris(?:e|ing)\s+from\s+(?:seated|chair)",
            r"(?:needs|uses)\s+arm\s+support",
        ],
        category: Category::Functional,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "stair_climb",
        keywords: &["stair", "climb", "ascend", "descend", "step", "railing"],
        patterns: &[
            r"stair\s+climb",
            r"ascend(?:s|ing)?\s+(?:and\s+)?descend",
            r"step\s+up\s+and\s+down",
            r"uses?\s+railing",
        ],
        category: Category::Functional,
        priority: Priority::Medium,
    },
    EntryDef {
        label: "squat_and_rise",
        keywords: &["squat", "rise", "full squat", "knee flexion", "difficulty"],
        patterns: &[
            r"squat\s+(?:and\s+)?rise",
            r"full\s+squat",
            r"half[-\s]squat",
            r"difficulty\s+squatting",
        ],
        category: Category::Functional,
        priority: Priority::Medium,
    },
    // Non-organic / symptom magnification
    EntryDef {
        label: "axial_loading",
        keywords: &[
            "axial loading",
            "axial compression",
            "downward pressure",
            "skull",
            "non-organic",
        ],
        patterns: &[
            r"axial\s+loading",
            r"axial\s+compression",
            r"downward\s+pressure\s+on\s+(?:the\s+)?head",
            r"non[-\s]organic\s+finding",
        ],
        category: Category::Simulation,
        priority: Priority::High,
    },
    EntryDef {
        label: "simulated_rotation",
        keywords: &[
            "simulated rotation",
            "en bloc",
            "trunk rotation",
            "shoulders and pelvis",
            "non-organic",
        ],
        patterns: &[
            r"simulated\s+rotation",
            r"en\s+bloc\s+(?:rotation|trunk)",
            r"rotating?\s+shoulders\s+and\s+pelvis",
        ],
        category: Category::Simulation,
        priority: Priority::High,
    },
    EntryDef {
        label: "superficial_tenderness",
        keywords: &["superficial tenderness", "light touch", "widespread", "non-anatomic"],
        patterns: &[
            r"superficial\s+tenderness",
            r"widespread\s+tenderness",
            r"light\s+touch\s+(?:causes|elicits)\s+pain",
        ],
        category: Category::Simulation,
        priority: Priority::High,
    },
    EntryDef {
        label: "non_anatomic_tenderness",
        keywords: &["non-anatomic", "diffuse", "broad area", "not localized"],
        patterns: &[
            r"non[-\s]anatomic\s+tenderness",
            r"diffuse\s+(?:pain|tenderness)",
            r"broad\s+area",
        ],
        category: Category::Simulation,
        priority: Priority::High,
    },
    EntryDef {
        label: "distracted_slr",
        keywords: &["distracted", "flip test", "inconsistent", "seated", "supine slr"],
        patterns: &[
            r"distracted\s+(?:straight\s+leg|slr)",
            r"flip\s+test",
            r"inconsistent\s+(?:straight\s+leg|slr)",
            r"seated\s+(?:vs\s+)?supine",
        ],
        category: Category::Simulation,
        priority: Priority::High,
    },
    EntryDef {
        label: "give_way_weakness",
        keywords: &[
            "give-way",
            "giveway",
            "cogwheel",
            "inconsistent effort",
            "regional weakness",
        ],
        patterns: &[
            r"give[-\s]way\s+weakness",
            r"cogwheel\s+weakness",
            r"inconsistent\s+effort",
            r"regional\s+weakness",
        ],
        category: Category::Simulation,
        priority: Priority::High,
    },
    EntryDef {
        label: "hoovers_test",
        keywords: &["hoover", "downward pressure", "opposite heel", "lack of effort"],
        patterns: &[
            r"hoover['s]*\s+(?:test|sign)",
            r"downward\s+pressure\s+(?:from\s+)?opposite",
            r"lack\s+of\s+effort",
        ],
        category: Category::Simulation,
        priority: Priority::Medium,
    },
    // Strength
    EntryDef {
        label: "manual_muscle_testing",
        keywords: &["manual muscle", "mmt", "strength", "5/5", "4/5", "muscle groups"],
        patterns: &[
            r"manual\s+muscle\s+test(?:ing)?",
            r"mmt",
            r"strength\s+(?:is\s+)?\d[/]\d",
            r"\d[/]\d\s+(?:strength|weakness)",
        ],
        category: Category::Mmt,
        priority: Priority::High,
    },
];
