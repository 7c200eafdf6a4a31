extern crate log;
extern crate pretty_env_logger;

use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{arg, command, value_parser, Command};
use log::{info, warn};
use rayon::prelude::*;

use omr_grader::{
    config::load_grade_options,
    debug::write_debug_images,
    upload::{read_upload, UploadLimits},
    AnswerKey, GradeOptions, GradeResponse, Grader,
};

fn main() {
    pretty_env_logger::init_custom_env("LOG");

    let matches = cli().get_matches();
    let debug = matches.get_flag("debug");
    let answers = matches
        .get_one::<String>("answers")
        .expect("answers are required");
    let max_file_size_mb = *matches
        .get_one::<u64>("max_file_size_mb")
        .expect("max file size has a default");
    let image_paths = matches
        .get_many::<PathBuf>("images")
        .expect("at least one image is required")
        .cloned()
        .collect::<Vec<PathBuf>>();

    let answer_key: AnswerKey = match answers.parse() {
        Ok(key) => key,
        Err(e) => {
            warn!("invalid answer key '{}': {}", answers, e);
            print_response(&GradeResponse::error(&e));
            exit(1);
        }
    };

    let options = match matches.get_one::<PathBuf>("config") {
        Some(path) => match load_grade_options(path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("{}", e);
                exit(1);
            }
        },
        None => GradeOptions::default(),
    };

    let grader = Grader::new(options);
    let limits = UploadLimits::from_megabytes(max_file_size_mb);

    let responses = image_paths
        .par_iter()
        .map(|path| grade_file(&grader, path, &answer_key, &limits, debug))
        .collect::<Vec<GradeResponse>>();

    for response in &responses {
        print_response(response);
    }

    if !responses.iter().all(GradeResponse::is_success) {
        exit(1);
    }
}

fn grade_file(
    grader: &Grader,
    path: &Path,
    answer_key: &AnswerKey,
    limits: &UploadLimits,
    debug: bool,
) -> GradeResponse {
    let bytes = match read_upload(path, limits) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(
                "rejected upload {} ({}): {}",
                path.display(),
                e.http_status(),
                e
            );
            return GradeResponse::error(&e);
        }
    };

    match grader.grade_sheet(&bytes, answer_key) {
        Ok(sheet) => {
            info!(
                "graded sheet '{}'. Score: {}/{}.",
                path.display(),
                sheet.result.correct_count,
                sheet.result.total_questions
            );

            if debug {
                match write_debug_images(path, &sheet, answer_key) {
                    Ok(written) => {
                        for debug_path in written {
                            info!("wrote {}", debug_path.display());
                        }
                    }
                    Err(e) => warn!("could not write debug images for {}: {}", path.display(), e),
                }
            }

            sheet.result.into()
        }
        Err(e) => {
            warn!(
                "processing error for '{}' ({}): {}",
                path.display(),
                e.http_status(),
                e
            );
            GradeResponse::error(&e)
        }
    }
}

fn print_response(response: &GradeResponse) {
    match serde_json::to_string(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing response: {}", e),
    }
}

#[allow(clippy::cognitive_complexity)]
fn cli() -> Command {
    command!()
        .arg(
            arg!(-a --answers <ANSWERS> "Comma-separated answer key, e.g. 1,4,2,3")
                .required(true),
        )
        .arg(
            arg!(-c --config <PATH> "Path to a JSON file with grading options")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(-d --debug "Write debug images next to each input image"))
        .arg(
            arg!(--max_file_size_mb <MB> "Largest accepted image, in megabytes")
                .id("max_file_size_mb")
                .long("max-file-size-mb")
                .env("MAX_FILE_SIZE_MB")
                .value_parser(value_parser!(u64))
                .default_value("5"),
        )
        .arg(
            arg!(images: <IMAGES> ... "Answer sheet images (PNG or JPEG)")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
}
