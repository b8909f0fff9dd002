//! Activities offered when the server starts.

/// Initial state of one activity.
#[derive(Debug, Clone, Copy)]
pub struct ActivitySeed<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub schedule: &'a str,
    pub max_participants: u32,
    pub participants: &'a [&'a str],
}

pub const ACTIVITIES: &[ActivitySeed<'static>] = &[
    ActivitySeed {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    ActivitySeed {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    ActivitySeed {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    ActivitySeed {
        name: "Soccer Team",
        description: "Join the school soccer team and compete in matches",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        max_participants: 22,
        participants: &["alex@mergington.edu"],
    },
    ActivitySeed {
        name: "Basketball Club",
        description: "Practice basketball skills and play friendly games",
        schedule: "Wednesdays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["mia@mergington.edu"],
    },
    ActivitySeed {
        name: "Art Club",
        description: "Explore painting, drawing and other visual arts",
        schedule: "Mondays, 3:30 PM - 5:00 PM",
        max_participants: 18,
        participants: &["lucas@mergington.edu"],
    },
    ActivitySeed {
        name: "Drama Club",
        description: "Act, direct and produce plays and performances",
        schedule: "Thursdays, 3:30 PM - 5:30 PM",
        max_participants: 20,
        participants: &["ava@mergington.edu"],
    },
    ActivitySeed {
        name: "Math Olympiad",
        description: "Solve challenging problems and prepare for math competitions",
        schedule: "Tuesdays, 3:30 PM - 4:30 PM",
        max_participants: 10,
        participants: &["liam@mergington.edu"],
    },
    ActivitySeed {
        name: "Debate Team",
        description: "Develop public speaking and argumentation skills",
        schedule: "Fridays, 4:00 PM - 5:30 PM",
        max_participants: 16,
        participants: &["noah@mergington.edu"],
    },
];
