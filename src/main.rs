//! Projector CLI - 360° panorama projection converter.
//!
//! Convert panoramas between equirectangular images and cubemaps, and pack
//! or unpack cubemap atlases.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use projector::cubemap::{compose, split, FaceLayout};
use projector::geometry::SphereGeometry;
use projector::io::{load_faces, load_image, save_faces, save_image};
use projector::pipeline::RemapPipeline;
use projector::projection::{
    Cubemap, CubemapOptions, Equirectangular, ProjectionDescriptor, ProjectionKind,
};

/// 360° panorama projection converter.
#[derive(Parser)]
#[command(name = "projector")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a panorama from one projection to another.
    Convert {
        /// Projection of the input images.
        #[arg(long)]
        in_projection: ProjectionArg,

        /// Projection of the output image.
        #[arg(long)]
        out_projection: ProjectionArg,

        /// Output file path. The format follows the extension.
        #[arg(short, long, default_value = "output.jpg")]
        output: PathBuf,

        /// Output width in pixels (a cubemap face is width / 4).
        #[arg(short = 'w', long, default_value = "4096")]
        output_width: u32,

        /// Margin pixels per cubemap face edge.
        #[arg(long, default_value = "0")]
        border_padding: u32,

        /// Also write the six faces of a cubemap output next to the output file.
        #[arg(long)]
        split_faces: bool,

        /// One equirectangular image, or six cubemap faces ordered +x -x +y -y +z -z.
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Pack six cubemap faces into a single atlas.
    Compose {
        /// Atlas layout.
        #[arg(short, long, default_value = "strip")]
        layout: LayoutArg,

        /// Output file path.
        #[arg(short, long, default_value = "cubemap.png")]
        output: PathBuf,

        /// Six faces ordered +x -x +y -y +z -z.
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Split a 6:1 strip atlas into six face images.
    Split {
        /// Strip atlas to split.
        atlas: PathBuf,

        /// Output directory for face files.
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Base name for face files.
        #[arg(short, long, default_value = "face")]
        name: String,
    },

    /// Display information about a projection configuration.
    Info {
        /// Projection kind.
        #[arg(short, long)]
        projection: ProjectionArg,

        /// Image width in pixels.
        #[arg(short, long, default_value = "4096")]
        width: u32,

        /// Margin pixels per cubemap face edge.
        #[arg(long, default_value = "0")]
        border_padding: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    /// 2:1 spherical panorama.
    Equirectangular,
    /// Six square faces.
    Cubemap,
}

impl From<ProjectionArg> for ProjectionKind {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Equirectangular => ProjectionKind::Equirectangular,
            ProjectionArg::Cubemap => ProjectionKind::Cubemap,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Six faces side by side (6:1).
    Strip,
    /// Unfolded cross (3:4).
    Cross,
}

impl From<LayoutArg> for FaceLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Strip => FaceLayout::Strip,
            LayoutArg::Cross => FaceLayout::Cross,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            in_projection,
            out_projection,
            output,
            output_width,
            border_padding,
            split_faces,
            images,
        } => {
            run_convert(
                in_projection.into(),
                out_projection.into(),
                &output,
                output_width,
                border_padding,
                split_faces,
                &images,
            );
        }
        Commands::Compose {
            layout,
            output,
            images,
        } => {
            run_compose(layout.into(), &output, &images);
        }
        Commands::Split {
            atlas,
            output_dir,
            name,
        } => {
            run_split(&atlas, &output_dir, &name);
        }
        Commands::Info {
            projection,
            width,
            border_padding,
        } => {
            run_info(projection.into(), width, border_padding);
        }
    }
}

fn check_image_count(kind: ProjectionKind, images: &[PathBuf]) {
    let expected = kind.input_image_count();
    if images.len() != expected {
        eprintln!(
            "Error: {} input requires exactly {} image(s), got {}",
            kind,
            expected,
            images.len()
        );
        std::process::exit(1);
    }
}

fn run_convert(
    in_kind: ProjectionKind,
    out_kind: ProjectionKind,
    output: &Path,
    output_width: u32,
    border_padding: u32,
    split_faces: bool,
    images: &[PathBuf],
) {
    check_image_count(in_kind, images);
    let options = CubemapOptions::with_border_padding(border_padding);

    println!("Converting {} -> {}", in_kind, out_kind);
    let start = Instant::now();

    let inputs = load_faces(images).unwrap_or_else(|e| {
        eprintln!("Error loading input: {}", e);
        std::process::exit(1);
    });

    let (source, input) = match in_kind {
        ProjectionKind::Cubemap => {
            let atlas = compose(FaceLayout::Strip, &inputs).unwrap_or_else(|e| {
                eprintln!("Error composing cubemap: {}", e);
                std::process::exit(1);
            });
            let descriptor = Cubemap::with_side(inputs[0].width(), &options).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            (atlas, ProjectionDescriptor::from(descriptor))
        }
        ProjectionKind::Equirectangular => {
            let Some(source) = inputs.into_iter().next() else {
                eprintln!("Error: no input image");
                std::process::exit(1);
            };
            let descriptor = Equirectangular::new(source.width()).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            if descriptor.height() != source.height() {
                log::warn!(
                    "input is {}x{}, not 2:1; sampling it as {}x{}",
                    source.width(),
                    source.height(),
                    descriptor.width(),
                    descriptor.height()
                );
            }
            (source, ProjectionDescriptor::from(descriptor))
        }
    };

    let output_desc = ProjectionDescriptor::from_width(out_kind, output_width, &options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    println!("  Input:  {}", input);
    println!("  Output: {}", output_desc);

    let pipeline = RemapPipeline::new(SphereGeometry::new());
    let result = pipeline.run(&source, &input, &output_desc).unwrap_or_else(|e| {
        eprintln!("Error during conversion: {}", e);
        std::process::exit(1);
    });
    println!("Conversion completed in {:.2?}", start.elapsed());

    save_image(&result, output).unwrap_or_else(|e| {
        eprintln!("Error saving {}: {}", output.display(), e);
        std::process::exit(1);
    });
    println!("  Saved {}", output.display());

    if split_faces {
        if out_kind != ProjectionKind::Cubemap {
            log::warn!("--split-faces only applies to cubemap output");
            return;
        }
        let faces = split(&result).unwrap_or_else(|e| {
            eprintln!("Error splitting cubemap: {}", e);
            std::process::exit(1);
        });
        let dir = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let ext = output
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("png");
        save_faces(&faces, dir, stem, ext).unwrap_or_else(|e| {
            eprintln!("Error saving faces: {}", e);
            std::process::exit(1);
        });
        println!("  Saved 6 face files: {}_*.{}", stem, ext);
    }
}

fn run_compose(layout: FaceLayout, output: &Path, images: &[PathBuf]) {
    check_image_count(ProjectionKind::Cubemap, images);

    let start = Instant::now();
    let faces = load_faces(images).unwrap_or_else(|e| {
        eprintln!("Error loading faces: {}", e);
        std::process::exit(1);
    });
    let atlas = compose(layout, &faces).unwrap_or_else(|e| {
        eprintln!("Error composing cubemap: {}", e);
        std::process::exit(1);
    });
    save_image(&atlas, output).unwrap_or_else(|e| {
        eprintln!("Error saving {}: {}", output.display(), e);
        std::process::exit(1);
    });
    println!(
        "Composed {} atlas {}x{} in {:.2?}: {}",
        layout,
        atlas.width(),
        atlas.height(),
        start.elapsed(),
        output.display()
    );
}

fn run_split(atlas_path: &Path, output_dir: &Path, name: &str) {
    let start = Instant::now();
    let atlas = load_image(atlas_path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", atlas_path.display(), e);
        std::process::exit(1);
    });
    let faces = split(&atlas).unwrap_or_else(|e| {
        eprintln!("Error splitting atlas: {}", e);
        std::process::exit(1);
    });
    let ext = atlas_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");
    save_faces(&faces, output_dir, name, ext).unwrap_or_else(|e| {
        eprintln!("Error saving faces: {}", e);
        std::process::exit(1);
    });
    println!(
        "Split into 6 faces of {}px in {:.2?}: {}/{}_*.{}",
        faces.side_length(),
        start.elapsed(),
        output_dir.display(),
        name,
        ext
    );
}

fn run_info(kind: ProjectionKind, width: u32, border_padding: u32) {
    let options = CubemapOptions::with_border_padding(border_padding);
    let descriptor = ProjectionDescriptor::from_width(kind, width, &options).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let (w, h) = descriptor.dimensions();
    let pixels = w as u64 * h as u64;
    let bytes_rgb = pixels * 3;
    let bytes_tables = pixels * 2 * 4; // two f32 tables

    println!("Projector - Projection Info");
    println!("===========================");
    println!();
    println!("Descriptor: {}", descriptor);
    println!("Pixel size: {}x{}", w, h);
    if let ProjectionDescriptor::Cubemap(c) = descriptor {
        println!("Face size:  {}x{} (x6)", c.side_length(), c.side_length());
    }
    println!();
    println!("Memory usage:");
    println!("  RGB image:         {:>12} bytes ({:.2} MB)", bytes_rgb, bytes_rgb as f64 / 1024.0 / 1024.0);
    println!("  Coordinate tables: {:>12} bytes ({:.2} MB)", bytes_tables, bytes_tables as f64 / 1024.0 / 1024.0);
}
