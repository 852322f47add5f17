use crate::*;
pub use running_odds::*;

mod running_odds;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}
