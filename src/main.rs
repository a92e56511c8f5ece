fn main() -> anyhow::Result<()> {
    jukebox::runtime::logging::init();
    jukebox::runtime::run()
}
