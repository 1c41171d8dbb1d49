mod boost;
mod courses;
mod game;
mod obstacles;
mod race;
mod world;

fn main() {
    // build the world once, then hand it to the demo loop
    let world = world::load_world();
    game::Game::new(world).start_loop();
}
