pub mod background;
pub mod game;

// Size of the bordered app frame, centered in the terminal.
pub const WIDTH: u16 = 102;
pub const HEIGHT: u16 = 39;

pub const TITLE_TEXT: &str = r#"
 _____  _       ____  ____  ____  _  _     ____  _  ____  ____
|  ___|| |     / () \|  _ \|  _ \| || |   |  _ \| ||  _ \|  _ \
| |_   | |    | |__| || |_) ) |_) ) \| |   | |_) ) || |_) ) | \ |
|  _|  | |__  |  __  ||  __/|  __/ \_  |   |  _ (| ||  _ <| |_/ |
|_|    |____| |_|  |_||_|   |_|    |___|   |____/|_||_| \_\____/
"#;

pub const TITLE_SHADOW: &str = r#"
  ____  _       ____  ____  ____  _  _     ____  _  ____  ____
 |  ___|| |     / () \|  _ \|  _ \| || |   |  _ \| ||  _ \|  _ \
 | |_   | |    | |__| || |_) ) |_) ) \| |   | |_) ) || |_) ) | \ |
 |  _|  | |__  |  __  ||  __/|  __/ \_  |   |  _ (| ||  _ <| |_/ |
 |_|    |____| |_|  |_||_|   |_|    |___|   |____/|_||_| \_\____/
"#;
