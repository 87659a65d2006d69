// One horizontal tile of the scrolling backdrop. All rows must have the same
// width; the scenery widget repeats the tile across the canvas, shifted by the
// scroll offset. The last `GROUND_ROWS` rows are drawn in the ground color.
pub const TILE: [&str; 8] = [
    "      .--.                        ",
    "   .-(    ).          .--.        ",
    "  (___.__)__)      .-(    ).      ",
    "                  (___.__)__)     ",
    "                                  ",
    "        _           __            ",
    "    ___/ \\____   __/  \\_____  ___ ",
    "__/          \\_/            \\/    ",
];

pub const TILE_W: usize = 34;
pub const GROUND_ROWS: usize = 3;
