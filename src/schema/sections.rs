// src/schema/sections.rs

//! Built-in table of known sections and parameters.

use crate::schema::model::{CrossCheck, ParamKind, ParamSpec, SectionSpec};

use ParamKind::*;

const fn p(
    key: &'static str,
    kind: ParamKind,
    default: &'static str,
    help: &'static str,
) -> ParamSpec {
    ParamSpec {
        key,
        kind,
        default,
        help,
    }
}

const LIBRARY_TYPES: &[&str] = &["fr-unstranded", "fr-firststrand", "fr-secondstrand"];

pub const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        name: "general",
        help: "project-wide settings; keys are also available without prefix",
        params: &[
            p("genome", Str, "hg19", "genome assembly identifier"),
            p(
                "genome_dir",
                Path,
                "/ifs/mirror/genomes/plain",
                "directory with indexed genome fasta files",
            ),
            p("database", Str, "csvdb", "sqlite database results are loaded into"),
            p("paired_end", Bool, "0", "reads are paired-end"),
            p("homer", Bool, "0", "run the homer peak calling workflow"),
            p("deeptools", Bool, "0", "run the deeptools QC workflow"),
            p("species", List, "", "species to compare, comma separated"),
            p("genomes", List, "", "genome assembly of each species, same order as species"),
            p("copyright", Str, "CGAT (2010-2014)", "copyright statement for the report"),
        ],
    },
    SectionSpec {
        name: "trim",
        help: "read trimming",
        params: &[
            p("trim", Bool, "0", "hard-trim reads before mapping"),
            p(
                "tool",
                Choice(&[
                    "fastx_trimmer",
                    "trimmomatic",
                    "trimgalore",
                    "cutadapt",
                    "sickle",
                    "flash",
                ]),
                "trimmomatic",
                "trimming tool",
            ),
            p("first_base", PositiveInt, "1", "first base to keep"),
            p("last_base", PositiveInt, "36", "last base to keep"),
            p("options", Str, "", "additional options for the trimming tool"),
        ],
    },
    SectionSpec {
        name: "filtering",
        help: "read filtering after mapping",
        params: &[
            p("quality", NonNegativeInt, "10", "minimum mapping quality"),
            p("dedup", Bool, "1", "remove duplicate reads"),
            p("remove_nonunique", Bool, "0", "remove reads mapping to multiple locations"),
            p("background", Pattern, "input|control", "pattern matching background (input) tracks"),
            p("min_insert_size", NonNegativeInt, "0", "minimum insert size for paired reads"),
            p("max_insert_size", NonNegativeInt, "500", "maximum insert size for paired reads"),
        ],
    },
    SectionSpec {
        name: "tiling",
        help: "genomic windows used for counting",
        params: &[
            p(
                "method",
                Choice(&["fixwidth_nooverlap", "fixwidth_overlap", "variablewidth", "cpg"]),
                "fixwidth_nooverlap",
                "tiling method",
            ),
            p("size", PositiveInt, "1000", "window size"),
            p("overlap", NonNegativeInt, "0", "overlap between adjacent windows"),
            p("min_reads", NonNegativeInt, "5", "minimum number of reads for a window to be kept"),
            p(
                "counting_method",
                Choice(&["midpoint", "nreads"]),
                "midpoint",
                "how reads are assigned to windows",
            ),
        ],
    },
    SectionSpec {
        name: "medips",
        help: "MEDIPS methylation analysis",
        params: &[
            p("read_length", PositiveInt, "36", "read length"),
            p("extension", NonNegativeInt, "400", "extend reads to this fragment length"),
            p("shift", NonNegativeInt, "0", "shift reads by this many bases"),
            p("window_size", PositiveInt, "100", "window size for saturation analysis"),
            p("uniq", Bool, "1", "only count unique reads"),
            p("saturation_iterations", PositiveInt, "10", "iterations of the saturation analysis"),
            p("fdr", Probability, "0.1", "FDR threshold for differential methylation"),
        ],
    },
    SectionSpec {
        name: "bwa",
        help: "BWA short-read aligner",
        params: &[
            p("index_dir", Path, "/ifs/mirror/genomes/bwa", "directory with BWA indices"),
            p("algorithm", Choice(&["aln", "mem"]), "aln", "alignment algorithm"),
            p("threads", PositiveInt, "4", "threads per job"),
            p("aln_options", Str, "-l 25", "options for bwa aln"),
            p("sampe_options", Str, "", "options for bwa sampe"),
            p("mem_options", Str, "", "options for bwa mem"),
        ],
    },
    SectionSpec {
        name: "samtools",
        help: "samtools",
        params: &[
            p("threads", PositiveInt, "1", "threads for sorting and compression"),
            p("sort_memory", Str, "1G", "memory per sorting thread"),
            p("view_options", Str, "", "additional options for samtools view"),
        ],
    },
    SectionSpec {
        name: "deseq",
        help: "DESeq differential analysis",
        params: &[
            p("window", PositiveInt, "1000", "window size for counting"),
            p(
                "min_mapping_quality",
                NonNegativeInt,
                "10",
                "minimum mapping quality; usually the same as filtering.quality",
            ),
            p("fdr", Probability, "0.01", "FDR threshold"),
            p(
                "dispersion_method",
                Choice(&["pooled", "per-condition", "blind"]),
                "pooled",
                "dispersion estimation method",
            ),
            p("fit_type", Choice(&["parametric", "local"]), "parametric", "dispersion fit type"),
            p(
                "sharing_mode",
                Choice(&["maximum", "fit-only", "gene-est-only"]),
                "maximum",
                "dispersion sharing mode",
            ),
        ],
    },
    SectionSpec {
        name: "edger",
        help: "edgeR differential analysis",
        params: &[
            p("fdr", Probability, "0.01", "FDR threshold"),
            p("dispersion", Float, "0.4", "common dispersion used without replicates"),
            p(
                "min_counts_per_row",
                NonNegativeInt,
                "1",
                "minimum total count for a row to be tested",
            ),
        ],
    },
    SectionSpec {
        name: "report",
        help: "report generation",
        params: &[
            p("threads", PositiveInt, "10", "threads used to build the report"),
            p("html", Path, "report/html", "output directory for html"),
            p("doctrees", Path, "report/doctrees", "directory for document trees"),
            p("prefix", Str, "default", "prefix for report directories"),
            p("engine", Choice(&["cgatreport", "sphinxreport"]), "cgatreport", "report engine"),
        ],
    },
    SectionSpec {
        name: "annotations",
        help: "annotation pipeline outputs",
        params: &[
            p(
                "dir",
                Path,
                "/ifs/data/annotations/hg19_ensembl62",
                "directory of the annotation pipeline",
            ),
            p(
                "database",
                Path,
                "/ifs/data/annotations/hg19_ensembl62/csvdb",
                "annotation database",
            ),
            p("gtf", Path, "", "gene set in gtf format"),
        ],
    },
    SectionSpec {
        name: "geneset",
        help: "reference gene set",
        params: &[
            p("all", Path, "geneset_all.gtf.gz", "complete gene set"),
            p("remove_repetitive_rna", Bool, "1", "remove repetitive RNA genes"),
            p("remove_contigs", Pattern, "chrM|random|chrUn", "pattern of contigs to remove"),
        ],
    },
    SectionSpec {
        name: "lincrna",
        help: "long non-coding RNA gene set",
        params: &[
            p("geneset", Path, "lincrna.gtf.gz", "lincRNA gene set"),
            p("min_length", PositiveInt, "200", "minimum transcript length"),
            p("min_exons", PositiveInt, "2", "minimum number of exons"),
        ],
    },
    SectionSpec {
        name: "bowtie",
        help: "bowtie short-read aligner",
        params: &[
            p("index_dir", Path, "/ifs/mirror/genomes/bowtie", "directory with bowtie indices"),
            p("threads", PositiveInt, "4", "threads per job"),
            p("options", Str, "-v 2 --best --strata -a", "bowtie options"),
        ],
    },
    SectionSpec {
        name: "cufflinks",
        help: "cufflinks transcript assembly",
        params: &[
            p("threads", PositiveInt, "4", "threads per job"),
            p("options", Str, "--upper-quartile-norm", "cufflinks options"),
            p("library_type", Choice(LIBRARY_TYPES), "fr-unstranded", "library type"),
            p("include_mask", Pattern, "", "pattern of gene biotypes to include in the mask"),
        ],
    },
    SectionSpec {
        name: "cuffdiff",
        help: "cuffdiff differential expression",
        params: &[
            p("threads", PositiveInt, "4", "threads per job"),
            p("options", Str, "", "cuffdiff options"),
            p("fdr", Probability, "0.05", "FDR threshold"),
            p("library_type", Choice(LIBRARY_TYPES), "fr-unstranded", "library type"),
            p(
                "min_alignment_count",
                NonNegativeInt,
                "10",
                "minimum number of alignments for a locus to be tested",
            ),
        ],
    },
    SectionSpec {
        name: "tophat",
        help: "tophat spliced aligner",
        params: &[
            p("threads", PositiveInt, "4", "threads per job"),
            p("options", Str, "", "tophat options"),
            p("library_type", Choice(LIBRARY_TYPES), "fr-unstranded", "library type"),
            p("mate_inner_dist", Int, "0", "expected inner distance between mates"),
            p("mate_std_dev", NonNegativeInt, "20", "standard deviation of the inner distance"),
            p(
                "include_reference_transcriptome",
                Bool,
                "1",
                "map against the reference transcriptome first",
            ),
        ],
    },
    SectionSpec {
        name: "reproducibility",
        help: "agreement between replicates",
        params: &[
            p("method", Choice(&["idr", "overlap"]), "idr", "reproducibility method"),
            p("idr_threshold", Probability, "0.05", "IDR threshold"),
            p(
                "min_overlap",
                Probability,
                "0.5",
                "minimum fraction of overlap between replicate peaks",
            ),
        ],
    },
    SectionSpec {
        name: "bam",
        help: "bam file post-processing",
        params: &[
            p(
                "dedup_method",
                Choice(&["picard", "samtools"]),
                "picard",
                "tool used to mark duplicates",
            ),
            p("subsample_fraction", Probability, "1.0", "fraction of reads to keep"),
            p("picard_memory", Str, "4G", "memory for Picard jobs"),
            p("picard_options", Str, "", "additional Picard options"),
        ],
    },
    SectionSpec {
        name: "gtf",
        help: "gtf processing",
        params: &[
            p("filename", Path, "geneset.gtf.gz", "gtf file used for counting"),
            p("feature", Str, "exon", "feature type to count"),
            p("attribute", Str, "gene_id", "attribute to group features by"),
        ],
    },
    SectionSpec {
        name: "database",
        help: "results database",
        params: &[
            p("name", Str, "csvdb", "database name"),
            p("url", Str, "sqlite:///./csvdb", "database connection url"),
        ],
    },
    SectionSpec {
        name: "homer",
        help: "homer peak calling and motif analysis",
        params: &[
            p("maketagdir_genome", Str, "hg19", "genome for makeTagDirectory"),
            p(
                "findpeaks_style",
                Choice(&["factor", "histone", "groseq", "tss", "dnase", "super", "mC"]),
                "factor",
                "findPeaks style",
            ),
            p("findpeaks_output", Str, "auto", "findPeaks output"),
            p("findpeaks_options", Str, "", "additional findPeaks options"),
            p("bed_options", Str, "", "options for pos2bed.pl"),
            p("annotatepeaks_genome", Str, "hg19", "genome for annotatePeaks.pl"),
            p("motif_genome", Str, "hg19", "genome for findMotifsGenome.pl"),
            p("motif_size", PositiveInt, "200", "region size for motif finding"),
            p("diffannotat_raw", Bool, "0", "annotate raw counts across tag directories"),
            p("annotate_raw_region", Str, "", "region for raw annotation"),
            p("annotate_raw_genome", Str, "hg19", "genome for raw annotation"),
            p("diff_expr", Bool, "0", "run getDiffExpression.pl"),
            p("diff_expr_options", Str, "", "getDiffExpression.pl options"),
            p("diff_expr_group", Str, "", "sample groups for getDiffExpression.pl"),
            p("diff_repeats", Bool, "0", "find differential peaks between replicates"),
            p("diff_repeats_genome", Str, "hg19", "genome for getDifferentialPeaksReplicates.pl"),
            p("diff_repeats_options", Str, "", "getDifferentialPeaksReplicates.pl options"),
        ],
    },
    SectionSpec {
        name: "deep",
        help: "deeptools quality control",
        params: &[
            p("ignore_dups", Bool, "0", "ignore duplicate reads"),
            p("mapping_qual", NonNegativeInt, "10", "minimum mapping quality"),
            p("paired_end", Bool, "0", "compute fragment size distribution"),
            p("logscale", Str, "", "value for --logScale of bamPEFragmentSize"),
            p("bam_coverage", Bool, "1", "run bamCoverage"),
            p("ignore_norm", Str, "", "chromosomes to ignore for normalisation"),
            p("binsize", PositiveInt, "10", "bin size for bamCoverage"),
            p("extendreads", Bool, "0", "extend reads to fragment length"),
            p("bamcoverage_options", Str, "", "additional bamCoverage options"),
            p("bam_compare", Bool, "1", "run bamCompare"),
            p("bamcompare_options", Str, "", "additional bamCompare options"),
            p("mode_setting", Str, "None", "region mode for multiBamSummary; None means bins"),
            p("summary_options", Str, "", "additional multiBamSummary options"),
            p("plot", Choice(&["heatmap", "scatterplot"]), "heatmap", "plotCorrelation plot type"),
            p("colormap", Str, "RdYlBu", "colour map for heatmaps"),
            p("cormethod", Choice(&["spearman", "pearson"]), "spearman", "correlation method"),
            p(
                "filetype",
                Choice(&["png", "pdf", "svg", "eps", "plotly"]),
                "png",
                "plot file format",
            ),
            p("plot_options", Str, "", "additional plotting options"),
            p(
                "startfactor",
                Choice(&["reference-point", "scale-regions"]),
                "reference-point",
                "computeMatrix mode",
            ),
            p("regions", Str, "TSS", "reference point for computeMatrix"),
            p("region_length", PositiveInt, "1000", "region body length for scale-regions"),
            p("bedfile", Path, "", "regions of interest in bed format"),
            p("brslength", NonNegativeInt, "", "distance upstream of the region"),
            p("arslength", NonNegativeInt, "", "distance downstream of the region"),
            p("matrix_bin_size", PositiveInt, "", "bin size for computeMatrix"),
            p("pergroup", Bool, "0", "plot per group instead of per sample"),
            p("out_sorted", Path, "", "write sorted regions to this file"),
            p("out_namematrix", Path, "", "write the matrix to this file"),
        ],
    },
    SectionSpec {
        name: "orthology",
        help: "orthology between species",
        params: &[
            p("groups", Path, "orthology_groups.tsv", "groups of 1:1 orthologs"),
            p("ensembl_version", PositiveInt, "62", "Ensembl release of the ortholog groups"),
        ],
    },
];

pub const CROSS_CHECKS: &[CrossCheck] = &[
    CrossCheck::Echo {
        leader: ("filtering", "quality"),
        follower: ("deseq", "min_mapping_quality"),
    },
    CrossCheck::Distinct {
        a: ("report", "html"),
        b: ("report", "doctrees"),
    },
];
