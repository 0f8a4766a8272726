//! Built-in hunt catalog, used when the config file defines no locations.

use waymark_common::LocationRecord;

/// The six-stop campus hunt: A → B → C → D → E → F
pub fn default_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::new(
            "A",
            "Starting Point - Library",
            "Where numbers flow and waves grow, data streams in rows. Find the place where knowledge glows.",
            "start",
            Some("B"),
        ),
        LocationRecord::new(
            "B",
            "Computer Lab",
            "Leaves dance in circles, beneath ancient bark. Your next stop lies in nature's park.",
            "library",
            Some("C"),
        ),
        LocationRecord::new(
            "C",
            "Old Oak Tree",
            "Where athletes gather, victories soar. Find your next clue where players score.",
            "computerlab",
            Some("D"),
        ),
        LocationRecord::new(
            "D",
            "Sports Field",
            "Books and bytes in perfect peace, where silence helps the mind release.",
            "oaktree",
            Some("E"),
        ),
        LocationRecord::new(
            "E",
            "Study Room",
            "Final challenge in your quest: where morning greetings are expressed.",
            "sportsfield",
            Some("F"),
        ),
        LocationRecord::new(
            "F",
            "Main Entrance",
            "Congratulations! You've completed the treasure hunt!",
            "studyroom",
            None,
        ),
    ]
}
