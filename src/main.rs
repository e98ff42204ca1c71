fn main() {
    fsres::app::cli::run();
}
