mod common;
mod directory;
mod sandbox;
