fn main() -> anyhow::Result<()> {
    clouddrive_lib::run()
}
