/// Pages the player can navigate between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Select,
    Game { letter: String, category: String },
    About,
}
