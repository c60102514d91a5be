//! Static grouped table of checkbox labels and the canonical
//! keyword phrases each label expands to.
//!
//! Group order is significant: the reducer emits bullets and keywords in
//! declaration order.


/// A single checkbox label and the keyword phrases it stands for.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// A named group of features, rendered as one bullet line when any is selected.
#[derive(Debug, Clone, Copy)]
pub struct FeatureGroup {
    pub name: &'static str,
    pub features: &'static [Feature],
}

const fn feature(label: &'static str, keywords: &'static [&'static str]) -> Feature {
    Feature { label, keywords }
}

/// Labels suggested as headline features when the user has not picked any.
pub const HEADLINE_DEFAULTS: &[&str] = &[
    "Pool (in-ground)",
    "Spa/Hot tub",
    "Ocean view",
    "Mountain view",
    "Large backyard",
    "Open-concept",
    "ADU (permitted)",
    "Guest house/Casita (permitted)",
    "Solar (owned)",
    "Single-story (step-free)",
    "2-car garage",
    "3-car garage",
    "4-car garage",
];

pub const FEATURE_TAXONOMY: &[FeatureGroup] = &[
    FeatureGroup {
        name: "Exterior & Lot",
        features: &[
            feature("Corner lot", &["corner lot"]),
            feature("Cul-de-sac", &["cul-de-sac"]),
            feature("Large backyard", &["large backyard", "spacious yard", "big yard"]),
            feature("Usable yard", &["usable yard", "flat yard"]),
            feature(
                "Drought-tolerant landscaping",
                &["drought tolerant", "low maintenance landscaping"],
            ),
            feature("Mature trees", &["mature trees"]),
            feature("Fruit trees", &["fruit trees"]),
            feature("Garden beds", &["garden beds"]),
            feature("RV/Boat parking", &["rv parking", "boat parking"]),
            feature("Gated driveway", &["gated driveway"]),
            feature("Circular driveway", &["circular driveway"]),
            feature("Motor court", &["motor court"]),
            feature("Privacy fencing", &["privacy fencing"]),
            feature("Privacy hedges", &["privacy hedges"]),
            feature("1-car garage", &["1-car garage", "single car garage"]),
            feature("2-car garage", &["2-car garage", "two car garage"]),
            feature("3-car garage", &["3-car garage", "three car garage"]),
            feature("4-car garage", &["4-car garage", "four car garage"]),
            feature("5-car+ garage", &["5-car garage", "five car garage"]),
            feature("Tandem garage", &["tandem garage"]),
            feature("Detached garage", &["detached garage"]),
            feature("Workshop area", &["garage workshop", "workbench"]),
            feature("Built-in garage storage", &["garage storage", "built-in garage cabinets"]),
            feature("EV charger (Level 2)", &["ev charger", "240v outlet"]),
        ],
    },
    FeatureGroup {
        name: "Outdoor Living",
        features: &[
            feature("Covered patio", &["covered patio"]),
            feature("Pergola", &["pergola"]),
            feature("Gazebo", &["gazebo"]),
            feature("Retractable awning", &["retractable awning"]),
            feature("Deck (wood)", &["wood deck"]),
            feature("Deck (composite)", &["composite deck"]),
            feature("Rooftop deck", &["rooftop deck"]),
            feature("Wraparound porch", &["wraparound porch"]),
            feature("Balcony", &["balcony"]),
            feature("Built-in BBQ", &["built-in bbq"]),
            feature(
                "Outdoor kitchen (sink/fridge)",
                &["outdoor kitchen", "outdoor sink", "outdoor fridge"],
            ),
            feature("Bar seating", &["bar seating"]),
            feature("Fire pit", &["fire pit"]),
            feature("Outdoor fireplace", &["outdoor fireplace"]),
            feature(
                "Water feature (fountain/pond/waterfall)",
                &["water feature", "fountain", "pond", "waterfall"],
            ),
            feature("Putting green", &["putting green"]),
            feature("Sport court", &["sport court"]),
            feature("Pickleball", &["pickleball"]),
            feature("Play structure", &["play structure"]),
            feature("Dog run", &["dog run"]),
            feature("Pool (in-ground)", &["pool", "in-ground pool"]),
            feature("Pool (saltwater)", &["saltwater pool"]),
            feature("Pool (heated)", &["heated pool"]),
            feature("Lap pool", &["lap pool"]),
            feature("Spa/Hot tub", &["spa", "hot tub"]),
            feature("Sauna (dry)", &["dry sauna"]),
            feature("Sauna (infrared)", &["infrared sauna"]),
        ],
    },
    FeatureGroup {
        name: "Views & Orientation",
        features: &[
            feature("Ocean view", &["ocean view"]),
            feature("Bay view", &["bay view"]),
            feature("City lights view", &["city lights view"]),
            feature("Mountain view", &["mountain view"]),
            feature("Canyon/Greenbelt view", &["canyon view", "greenbelt view"]),
            feature("Golf course view", &["golf course view"]),
            feature("Park view", &["park view"]),
            feature("East-facing (morning light)", &["east-facing"]),
            feature("West-facing (sunsets)", &["west-facing"]),
            feature("South-facing yard", &["south-facing yard"]),
            feature("Picture windows", &["picture windows"]),
            feature("Bay window", &["bay window"]),
        ],
    },
    FeatureGroup {
        name: "Property Type & Layout",
        features: &[
            feature("Single-story (step-free)", &["single story", "single level", "step-free"]),
            feature("Two-story", &["two story"]),
            feature("Split-level", &["split level"]),
            feature("Open-concept", &["open concept", "open floor plan"]),
            feature("Great room", &["great room"]),
            feature("Vaulted ceilings", &["vaulted ceilings"]),
            feature("Double-height ceilings", &["double-height ceilings"]),
            feature("Skylights", &["skylights"]),
            feature("Formal dining", &["formal dining"]),
            feature("Den/Home office", &["den", "home office"]),
            feature("Loft", &["loft"]),
            feature("Media room/Home theater", &["media room", "home theater"]),
            feature("Game room", &["game room"]),
            feature("Gym", &["home gym"]),
            feature("Mudroom", &["mudroom"]),
            feature("ADU (permitted)", &["adu"]),
            feature("Guest house/Casita (permitted)", &["guest house", "casita"]),
            feature("Primary suite on main", &["primary on main"]),
            feature("Dual primary suites", &["dual primary"]),
            feature("Jack-and-Jill bath", &["jack and jill"]),
            feature("En-suite secondaries", &["en-suite bedrooms"]),
            feature("Built-ins", &["built-ins"]),
            feature("Window seats", &["window seats"]),
            feature("Wainscoting/Trim/Crown", &["wainscoting", "crown molding", "trim work"]),
            feature("Recessed lighting", &["recessed lighting"]),
            feature("Statement lighting", &["statement lighting"]),
            feature("Fireplace(s)", &["fireplace"]),
        ],
    },
    FeatureGroup {
        name: "Kitchen",
        features: &[
            feature("Newly updated kitchen", &["updated kitchen", "renovated kitchen"]),
            feature("Quartz countertops", &["quartz countertops"]),
            feature("Granite countertops", &["granite countertops"]),
            feature("Quartzite countertops", &["quartzite"]),
            feature("Marble countertops", &["marble"]),
            feature("Butcher block counters", &["butcher block"]),
            feature("Soft-close cabinets", &["soft close cabinets"]),
            feature("Walk-in pantry", &["walk-in pantry"]),
            feature("Glass uppers", &["glass uppers"]),
            feature("Custom millwork", &["custom cabinets"]),
            feature("Island with seating", &["kitchen island with seating"]),
            feature("Waterfall edge", &["waterfall island"]),
            feature("Prep sink", &["prep sink"]),
            feature("Stainless appliances", &["stainless steel appliances"]),
            feature("Panel-ready/built-in fridge", &["panel ready appliances", "built-in fridge"]),
            feature("Gas range", &["gas range"]),
            feature("Professional range (36\")", &["36-inch range", "professional range"]),
            feature("Professional range (48\")", &["48-inch range", "professional range"]),
            feature("Double oven", &["double oven"]),
            feature("Convection/steam oven", &["convection oven", "steam oven"]),
            feature("Pot filler", &["pot filler"]),
            feature("Vented hood", &["vented hood"]),
            feature("Farmhouse sink", &["farmhouse sink"]),
            feature("Touch faucet", &["touch faucet"]),
            feature("Water filtration/RO", &["water filtration", "reverse osmosis"]),
            feature("Beverage center/coffee bar", &["beverage center", "coffee bar"]),
            feature("Wine fridge", &["wine fridge"]),
            feature("Microwave drawer", &["microwave drawer"]),
            feature("Designer backsplash", &["designer backsplash"]),
        ],
    },
    FeatureGroup {
        name: "Bathrooms",
        features: &[
            feature("Double vanity", &["double vanity"]),
            feature("Soaking tub", &["soaking tub"]),
            feature("Separate shower", &["separate shower"]),
            feature("Walk-in/curbless shower", &["walk-in shower", "curbless shower"]),
            feature("Rain shower", &["rain shower"]),
            feature("Body sprays", &["body sprays"]),
            feature("Frameless glass", &["frameless glass"]),
            feature("Heated floors", &["heated floors"]),
            feature("Towel warmer", &["towel warmer"]),
            feature("Bidet/bidet seat", &["bidet", "bidet seat"]),
            feature("Smart mirror", &["smart mirror", "backlit mirror"]),
            feature("Smart lighting (bath)", &["smart bath lighting"]),
            feature("Linen closet", &["linen closet"]),
            feature("Updated powder room", &["updated powder room"]),
            feature("Skylight in bath", &["bath skylight"]),
        ],
    },
    FeatureGroup {
        name: "Bedrooms & Storage",
        features: &[
            feature("Primary walk-in closet", &["walk-in closet"]),
            feature("Custom closet system", &["custom closets"]),
            feature("Primary balcony", &["primary balcony"]),
            feature("Primary retreat/sitting area", &["primary retreat"]),
            feature("Fireplace in primary", &["primary fireplace"]),
            feature("Large secondary bedrooms", &["large secondary bedrooms"]),
            feature("Guest suite", &["guest suite"]),
            feature("Nursery", &["nursery"]),
            feature("Coat closet", &["coat closet"]),
            feature("Linen storage", &["linen storage"]),
            feature("Attic storage", &["attic storage"]),
            feature("Shed/Outbuilding", &["storage shed", "outbuilding"]),
            feature("Overhead garage racks", &["garage racks"]),
        ],
    },
    FeatureGroup {
        name: "Laundry & Utility",
        features: &[
            feature("Inside laundry room", &["laundry room"]),
            feature("Garage laundry", &["garage laundry"]),
            feature("Closet laundry", &["closet laundry"]),
            feature("Laundry sink", &["laundry sink"]),
            feature("Folding counter", &["folding counter"]),
            feature("Laundry cabinetry", &["laundry cabinets"]),
            feature("Hanging rack", &["hanging rack"]),
            feature("Gas hookups", &["gas hookups"]),
            feature("Electric hookups (220V)", &["electric hookups", "220v laundry"]),
        ],
    },
    FeatureGroup {
        name: "Flooring & Surfaces",
        features: &[
            feature("Hardwood/Wood floors", &["hardwood floors", "wood floors"]),
            feature("Luxury vinyl plank (LVP)", &["lvp flooring"]),
            feature("Tile (porcelain/ceramic)", &["tile floors"]),
            feature(
                "Stone (travertine/marble/slate)",
                &["stone floors", "travertine", "marble", "slate"],
            ),
            feature("Polished concrete", &["polished concrete"]),
            feature("New carpet", &["new carpet"]),
            feature("Hypoallergenic flooring", &["hypoallergenic flooring"]),
        ],
    },
    FeatureGroup {
        name: "Systems, Energy & Smart Home",
        features: &[
            feature("Solar (owned)", &["owned solar"]),
            feature("Solar (leased)", &["leased solar"]),
            feature("Battery backup", &["battery backup"]),
            feature("Generator transfer switch", &["generator transfer switch"]),
            feature("Dual-pane windows", &["dual pane windows"]),
            feature("Energy-efficient glazing", &["energy efficient windows"]),
            feature(
                "Upgraded insulation (attic/crawl)",
                &["attic insulation", "crawlspace insulation"],
            ),
            feature("Tankless water heater", &["tankless water heater"]),
            feature("Newer HVAC", &["newer hvac"]),
            feature("Multi-zone HVAC", &["multi-zone hvac"]),
            feature("Whole-house fan", &["whole house fan"]),
            feature("Smart thermostat", &["smart thermostat"]),
            feature("Video doorbell", &["video doorbell"]),
            feature("Security cameras", &["security cameras"]),
            feature("Smart locks", &["smart locks"]),
            feature("Smart lighting", &["smart lighting"]),
            feature("Wired Ethernet (CAT6)", &["cat6 wiring", "ethernet wiring"]),
            feature("Speaker pre-wire", &["speaker prewire"]),
            feature("Security system", &["security system"]),
            feature("Interior fire sprinklers", &["fire sprinklers"]),
            feature("Smart smoke detectors", &["smart smoke detectors"]),
            feature("Smart CO detectors", &["smart co detectors"]),
            feature("Fresh-air system/ERV", &["erv", "fresh air system"]),
            feature("Air purifier", &["air purifier"]),
            feature("Low-VOC finishes", &["low voc finishes"]),
        ],
    },
    FeatureGroup {
        name: "Community & HOA",
        features: &[
            feature("Gated community", &["gated community"]),
            feature("Guard-gated community", &["guard gated"]),
            feature("Community pool", &["community pool"]),
            feature("Community spa", &["community spa"]),
            feature("Clubhouse", &["clubhouse"]),
            feature("Gym/Fitness center", &["fitness center"]),
            feature("Pickleball courts", &["pickleball"]),
            feature("Tennis courts", &["tennis courts"]),
            feature("Playground", &["playground"]),
            feature("Dog park", &["dog park"]),
            feature("Walking trails", &["walking trails"]),
            feature("Community garden", &["community garden"]),
            feature("Package lockers", &["package lockers"]),
            feature("Community RV lot", &["community rv lot"]),
        ],
    },
    FeatureGroup {
        name: "Location & Access",
        features: &[
            feature("Near parks", &["near parks"]),
            feature("Near trails", &["near trails"]),
            feature("Near shopping", &["near shopping"]),
            feature("Near dining", &["near dining"]),
            feature("Near hospitals/medical", &["near hospitals", "near medical"]),
            feature("Easy freeway access", &["easy freeway access"]),
            feature("Near I-5", &["near i-5"]),
            feature("Near I-15", &["near i-15"]),
            feature("Near local schools (proximity)", &["near local schools"]),
            feature("Transit nearby", &["near transit"]),
        ],
    },
    FeatureGroup {
        name: "Specialty / Market Segments",
        features: &[
            feature("Accessibility: zero-step entry", &["zero step entry", "step-free"]),
            feature("Accessibility: wide halls/doors", &["wide hallways", "wide doors"]),
            feature("Roll-in/curbless shower", &["roll-in shower", "curbless shower"]),
            feature("New construction/recent build", &["new construction", "recent build"]),
            feature("Craftsman style", &["craftsman"]),
            feature("Spanish/Mediterranean style", &["spanish", "mediterranean"]),
            feature("Mid-Century style", &["mid-century"]),
            feature("Modern/Contemporary", &["modern", "contemporary"]),
            feature("Farmhouse/Tudor", &["farmhouse", "tudor"]),
            feature("Income/ADU/lock-off", &["adu potential", "separate entrance", "lock off"]),
            feature("Well", &["well"]),
            feature("Septic (updated)", &["septic updated"]),
            feature("Workshop/Barn/Studio", &["workshop", "barn", "artist studio"]),
        ],
    },
];

/// Looks up a group by its display name.
pub fn group(name: &str) -> Option<&'static FeatureGroup> {
    FEATURE_TAXONOMY.iter().find(|g| g.name == name)
}

/// Position of a group in declaration order.
pub fn group_index(name: &str) -> Option<usize> {
    FEATURE_TAXONOMY.iter().position(|g| g.name == name)
}

/// Keyword phrases for `label`, looked up in `group_name` first and then in
/// every group. `None` means the label is free text.
pub fn keywords_for(group_name: &str, label: &str) -> Option<&'static [&'static str]> {
    let in_group = group(group_name)
        .and_then(|g| g.features.iter().find(|f| f.label == label));

    in_group
        .or_else(|| {
            FEATURE_TAXONOMY
                .iter()
                .flat_map(|g| g.features.iter())
                .find(|f| f.label == label)
        })
        .map(|f| f.keywords)
        .filter(|k| !k.is_empty())
}
