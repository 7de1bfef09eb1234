mod controls;
mod overlay;
mod panels;
