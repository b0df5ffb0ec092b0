//! WeightGraph 命令行工具
//!
//! 由命令行给出的顶点和边构造图，运行一个算法并打印结果

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use weightgraph::{
    build_reverse, explore_bfs, explore_dfs, topo_sort, DijkstraResolver, Distance, Edge, Graph,
};

#[derive(Parser, Debug)]
#[command(name = "weightgraph-cli")]
#[command(about = "WeightGraph 图算法演示工具")]
struct Args {
    /// 顶点键，可重复；不给出顶点和边时使用内置示例图
    #[arg(short, long = "vertex")]
    vertices: Vec<String>,

    /// 边，格式 SRC,DST,WEIGHT，可重复
    #[arg(short, long = "edge")]
    edges: Vec<EdgeSpec>,

    /// 要运行的算法
    #[arg(short, long, value_enum, default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,

    /// 起点（bfs / dijkstra），默认为第一个顶点
    #[arg(short, long)]
    start: Option<String>,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Dfs,
    Bfs,
    Topo,
    Dijkstra,
    Reverse,
}

/// 命令行中的一条边
#[derive(Debug, Clone)]
struct EdgeSpec(Edge<String, f64>);

impl FromStr for EdgeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [src, dst, weight] => {
                let weight = weight
                    .parse::<f64>()
                    .map_err(|e| format!("无效的权重 '{}': {}", weight, e))?;
                Ok(EdgeSpec(Edge::new(src.to_string(), dst.to_string(), weight)))
            }
            _ => Err(format!("边格式应为 SRC,DST,WEIGHT，实际为 '{}'", s)),
        }
    }
}

/// 内置示例图
fn sample_graph() -> weightgraph::Result<Graph<String, f64>> {
    let vertices = ["A", "B", "C", "D", "E", "F"].map(String::from);
    let edges = [
        ("A", "B", 1.0),
        ("A", "C", 4.0),
        ("B", "C", 2.0),
        ("B", "D", 3.0),
        ("C", "D", 5.0),
        ("C", "E", 6.0),
        ("D", "F", 10.0),
        ("E", "F", 1.0),
    ]
    .map(|(src, dst, w)| Edge::new(src.to_string(), dst.to_string(), w));
    Graph::from_parts(vertices, edges)
}

fn build_graph(args: &Args) -> anyhow::Result<Graph<String, f64>> {
    let graph = if args.vertices.is_empty() && args.edges.is_empty() {
        sample_graph()?
    } else {
        Graph::from_parts(
            args.vertices.iter().cloned(),
            args.edges.iter().map(|spec| spec.0.clone()),
        )?
    };
    Ok(graph)
}

fn start_vertex(args: &Args, graph: &Graph<String, f64>) -> anyhow::Result<String> {
    match &args.start {
        Some(start) => Ok(start.clone()),
        None => graph
            .all_vertices()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("图为空，无法选择起点")),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("无效的日志级别")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let graph = build_graph(&args).context("构造图失败")?;
    if !args.json {
        println!(
            "图: {} 个顶点, {} 条边",
            graph.vertex_count(),
            graph.edge_count()
        );
    }

    match args.algorithm {
        Algorithm::Dfs => {
            let mut stack = explore_dfs(&graph)?;
            if args.json {
                stack.reverse();
                println!("{}", json!({ "reverse_postorder": stack }));
            } else {
                println!("深度优先遍历（逆后序）:");
                while let Some(vertex) = stack.pop() {
                    println!("  {}", vertex);
                }
            }
        }

        Algorithm::Bfs => {
            let start = start_vertex(&args, &graph)?;
            let tree = explore_bfs(&graph, &start)?;
            if args.json {
                println!("{}", json!({ "start": start, "predecessors": tree }));
            } else {
                println!("广度优先前驱树（起点 {}）:", start);
                for (vertex, pred) in &tree {
                    println!("  {} <- {}", vertex, pred);
                }
            }
        }

        Algorithm::Topo => {
            let sorted = topo_sort(&graph)?;
            if args.json {
                println!("{}", json!({ "order": sorted }));
            } else {
                println!("拓扑序: {}", sorted.join(" -> "));
            }
        }

        Algorithm::Dijkstra => {
            let start = start_vertex(&args, &graph)?;
            let mut resolver = DijkstraResolver::new(graph);
            resolver.solve(&start)?;
            let results = resolver.results()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(results)?);
            } else {
                println!("最短路径（起点 {}）:", start);
                let mut vertices: Vec<&String> = results.distances.keys().collect();
                vertices.sort();
                for vertex in vertices {
                    let distance = Distance(results.distances[vertex]);
                    match results.predecessors.get(vertex) {
                        Some(pred) => println!("  {}: {} (经 {})", vertex, distance, pred),
                        None => println!("  {}: {}", vertex, distance),
                    }
                }
            }
        }

        Algorithm::Reverse => {
            let reverse = build_reverse(&graph)?;
            if args.json {
                println!("{}", json!({ "edges": reverse.edges() }));
            } else {
                println!("反向图的边:");
                for edge in reverse.edges() {
                    println!("  {} -> {} ({})", edge.src, edge.dst, edge.weight);
                }
            }
        }
    }

    Ok(())
}
