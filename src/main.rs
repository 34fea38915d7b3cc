use clap::{arg,crate_version,Command};
use burrows::pipeline;

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();

    let long_help =
"Examples:
---------
Compress:      `burrows compress -i my_file`
Expand:        `burrows expand -i my_file.burrows`";

    let mut main_cmd = Command::new("burrows")
        .about("Lossless BWT + Huffman file compressor")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .about("compress a file, writing <input>.burrows"));

    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "input path, must end in .burrows").required(true))
        .about("expand a .burrows archive, writing the original file alongside it"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = format!("{}.burrows",path_in);
        let (in_size,out_size) = pipeline::compress_file(path_in,&path_out)?;
        log::info!("compressed {} bytes into {} bytes",in_size,out_size);
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = path_in.strip_suffix(".burrows")
            .ok_or(burrows::Error::FileFormatMismatch)?
            .to_string();
        let (in_size,out_size) = pipeline::expand_file(path_in,&path_out)?;
        log::info!("expanded {} bytes into {} bytes",in_size,out_size);
    }

    Ok(())
}
