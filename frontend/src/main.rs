fn main() {
    training_center_frontend::run();
}
