use crate::algorithms::{self, frames::DEFAULT_FRAME_SIZE};

pub fn list_codecs(detailed: bool) {
    println!("Available codecs:");
    for codec in algorithms::all(DEFAULT_FRAME_SIZE) {
        let aliases = codec.aliases();
        if detailed {
            println!("  {:<16} {}", aliases[0], codec.short_description());
            println!("  {:<16} aliases: {}", "", aliases.join(", "));
        } else {
            println!("  {}", aliases.join(", "));
        }
    }
}
