// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::images::ImageMode;
use crate::config::rules::{RuleTable, Selector};
use crate::runner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSetting {
    Off,
    Mode(ImageMode),
}

#[derive(Clone, Debug)]
pub struct Params {
    pub file: Option<PathBuf>,        // catalog file to patch
    pub rules: Option<PathBuf>,       // JSON config; built-in defaults if None
    pub images: Option<ImageSetting>, // override of the configured image behavior
    pub overwrite: bool,              // replace payload fields even when present
    pub dry_run: bool,                // report only, no write-back
    pub out: Option<PathBuf>,         // write elsewhere instead of in place
    pub list_rules: bool,             // print rule table then exit
}

impl Params {
    pub fn new() -> Self {
        Self {
            file: None,
            rules: None,
            images: None,
            overwrite: false,
            dry_run: false,
            out: None,
            list_rules: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut params = Params::new();
    parse_cli(&mut params)?;

    if params.list_rules {
        let (rules, _) = crate::config::load(params.rules.as_deref())?;
        print_rules(&rules);
        return Ok(());
    }

    let summary = runner::run(&params)?;
    let r = summary.report;
    println!("records scanned:  {}", r.records_scanned);
    println!("records matched:  {}", r.records_matched);
    println!("fields inserted:  {}", r.fields_inserted);
    println!("fields replaced:  {}", r.fields_replaced);
    println!("fields skipped:   {}", r.fields_skipped);
    println!("images assigned:  {}", r.images_assigned);
    match summary.written {
        Some(path) => println!("wrote {}", path.display()),
        None => println!("dry run, nothing written"),
    }
    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-r" | "--rules" => {
                let v = args.next().ok_or("Missing value for --rules")?;
                params.rules = Some(PathBuf::from(v));
            }
            "--images" => {
                let v = args.next().ok_or("Missing value for --images")?;
                params.images = Some(match v.to_ascii_lowercase().as_str() {
                    "rotation" => ImageSetting::Mode(ImageMode::Rotation),
                    "keyword" => ImageSetting::Mode(ImageMode::Keyword),
                    "off" => ImageSetting::Off,
                    other => return Err(format!("Unknown image mode: {}", other).into()),
                });
            }
            "--overwrite" => params.overwrite = true,
            "-n" | "--dry-run" => params.dry_run = true,
            "-o" | "--out" => {
                let v = args.next().ok_or("Missing output path")?;
                params.out = Some(PathBuf::from(v));
            }
            "--list-rules" => params.list_rules = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ if !a.starts_with('-') && params.file.is_none() => {
                params.file = Some(PathBuf::from(a));
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if !params.list_rules && params.file.is_none() {
        return Err("Missing catalog file argument".into());
    }
    Ok(())
}

fn print_rules(rules: &RuleTable) {
    for rule in rules.rules() {
        let sel = match &rule.selector {
            Selector::Category(c) => format!("category = {c}"),
            Selector::NameContains { needle, locale } => format!("name[{locale}] ~ {needle}"),
        };
        let p = &rule.payload;
        let mut parts = Vec::new();
        if let Some(n) = &p.nutrition {
            parts.push(format!("{} kcal, {}g prot, {}g carbs, {}g fat", n.calories, n.protein, n.carbs, n.fat));
        }
        if let Some(q) = &p.quantity {
            parts.push(format!("quantity {q}"));
        }
        if p.tips.is_some() {
            parts.push(s!("tips fr/en"));
        }
        if let Some(img) = &p.image {
            parts.push(format!("image {img}"));
        }
        println!("{sel}: {}", parts.join(", "));
    }
}
