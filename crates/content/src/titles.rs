//! Local song-title table, keyed by concept.

use rand::seq::SliceRandom;
use rand::Rng;
use sim_core::Concept;

const CUTE: &[&str] = &[
    "Cheer Up", "Candy Pop", "Heart Shaker", "Signal", "Likey", "Bubble", "Ice Cream",
    "Coloring Book", "Knock Knock", "Rookie", "Power Up", "Love Bomb", "Tag Me", "Zig Zag",
    "Dolphin", "Fifth Season", "Windy Day", "Cupid", "Luminous", "Sneakers",
];
const GIRL_CRUSH: &[&str] = &[
    "Next Level", "Savage", "Baddie", "Spicy", "Black Mamba", "Hobgoblin", "Crazy", "Adios",
    "Sixth Sense", "Wonder Woman", "Hot Issue", "Volume Up", "Red", "Roll Deep", "Zoom",
    "Eclipse", "Spit It Out", "Snapping", "Play", "Queencard",
];
const DARK: &[&str] = &[
    "Monster", "Psycho", "Voodoo Doll", "Villain", "Lion", "Full Moon", "Witch", "Deja Vu",
    "Peek-A-Boo", "Automatic", "Chill Kill", "Cosmic", "Spider", "Crown", "Blue Hour",
    "Frost", "Sweet Venom", "Maestro", "Armageddon", "Supernova",
];
const FRESH: &[&str] = &[
    "Hype Boy", "Attention", "Ditto", "After Like", "Island", "Boogie Up", "Shake It",
    "Holiday", "Travel", "Thank You", "Summer Rain", "Taxi", "Generation", "Rising",
    "Bubble Gum", "Super Shy", "Get Up", "Teddy Bear", "Magnetic", "Sticky",
];
const RETRO: &[&str] = &[
    "Tell Me", "Roly Poly", "Nobody", "Mago", "When We Disco", "Dynamite", "Lady", "Reboot",
    "Magic", "Ring Ring", "Disco", "Soul Lady", "Lilac", "Celebrity", "Epilogue", "Weekend",
    "Timeless", "Heart", "Fabulous", "Lalalay",
];
const HIPHOP: &[&str] = &[
    "Mic Drop", "Dope", "Fire", "Whistle", "Hard Carry", "Back Door", "Maniac", "Shut Down",
    "Gucci", "Money", "My Bag", "Darari", "Bona Bona", "S-Class", "Megaverse", "Domino",
    "Cheese", "Kick It", "Cherry Bomb", "Boom",
];
const BALLAD: &[&str] = &[
    "Through the Night", "Ending Scene", "Stay", "Spring Day", "Missing You", "Breathe",
    "Downpour", "Universe", "Goodbye", "Lonely", "Blue", "Palette", "Love Poem", "Eight",
    "Knees", "Twenty-Three", "Autumn Morning", "Memories", "Hero", "Sudden Shower",
];

/// Titles available for a concept.
pub fn titles_for(concept: Concept) -> &'static [&'static str] {
    match concept {
        Concept::Cute => CUTE,
        Concept::GirlCrush => GIRL_CRUSH,
        Concept::Dark => DARK,
        Concept::Fresh => FRESH,
        Concept::Retro => RETRO,
        Concept::HipHop => HIPHOP,
        Concept::Ballad => BALLAD,
    }
}

/// Chance that a drawn title becomes a year-suffixed variant.
pub const VARIANT_CHANCE: f64 = 0.1;

/// Pick a title for `concept`; one in ten comes back as a `(Ver. N)` variant.
pub fn random_title<R: Rng + ?Sized>(concept: Concept, rng: &mut R) -> String {
    let title = titles_for(concept).choose(rng).copied().unwrap_or("Untitled");
    if rng.gen_bool(VARIANT_CHANCE) {
        let year: u32 = rng.gen_range(0..2024);
        format!("{title} (Ver. {year})")
    } else {
        title.to_string()
    }
}
