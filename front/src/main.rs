fn main() {
    front::run()
}
