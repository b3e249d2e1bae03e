//! User-facing reply texts.

pub const WELCOME: &str = "Welcome to the Legendary Empire!\nShall we begin the adventure?";
pub const BEGIN_BUTTON: &str = "Begin ⭐";
pub const ALREADY_REGISTERED: &str = "You are already registered!";
pub const NOT_REGISTERED: &str = "You are not registered yet. Send /start to join the empire.";
pub const ASK_NAME: &str = "Choose a name for your hero (2 to 15 characters).";
pub const NAME_REJECTED: &str = "The name must be 2 to 15 characters long. Please try again.";
pub const MAP_INTRO: &str = "This is your map 🗺️. Tap a cell to make a move.";
pub const NO_MAP: &str = "You have no map yet. Open it with /show_map first.";
pub const OUT_OF_BOUNDS: &str = "That cell is not on your map.";
pub const ADMIN_ONLY: &str = "Only administrators have access.";
pub const GENERIC_FAILURE: &str = "Something went wrong on our side. Please try again later.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Send /help for the list of commands.";

pub const HELP: &str = "Commands:\n\
/start - register in the empire\n\
/show_map - show your map\n\
/rename - choose a new name for your hero\n\
/help - this list";

pub fn greeting(name: &str) -> String {
    format!("Greetings, {}, go and explore the world! Send /show_map to see your lands.", name)
}

pub fn already_named(name: &str) -> String {
    format!("Your hero is already called {}. Send /rename to change it.", name)
}

pub fn player_count(total: usize) -> String {
    format!("Registered players: {}", total)
}
