mod hotbar;
mod overlay;
