use std::io;

use chrono::Local;
use log::info;

use promptfan::ai::{DispatchCallback, Dispatcher, DEFAULT_TIMEOUT_SECS};
use promptfan::improve::{ImproveService, TaskType};
use promptfan::settings;

/// 发送时附加的 Markdown 格式要求（--markdown 开启）
const MARKDOWN_HINT: &str = "**Important:** Answer in Markdown format: use headings (# or ##), \
lists, code blocks and emphasis where appropriate. \
Use formatting to keep the answer readable.\n\n";

enum Mode {
    Send,
    Improve,
    Alternatives,
    Adapt(TaskType),
}

struct CliArgs {
    mode: Mode,
    prompt: String,
    endpoints_path: String,
    timeout_secs: u64,
    markdown: bool,
}

fn print_usage() {
    eprintln!("用法:");
    eprintln!("  promptfan [--endpoints FILE] [--timeout N] [--markdown] <提示词>");
    eprintln!("  promptfan improve <提示词>        改进提示词");
    eprintln!("  promptfan alternatives <提示词>   生成候选说法");
    eprintln!("  promptfan adapt <code|analysis|creative> <提示词>");
}

fn parse_args() -> Result<CliArgs, String> {
    let mut mode = Mode::Send;
    let mut prompt_parts: Vec<String> = Vec::new();
    let mut endpoints_path = settings::endpoints_path();
    let mut timeout_secs = DEFAULT_TIMEOUT_SECS;
    let mut markdown = false;

    let mut args = std::env::args().skip(1);
    let mut first = true;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "improve" if first => mode = Mode::Improve,
            "alternatives" if first => mode = Mode::Alternatives,
            "adapt" if first => {
                let t = args
                    .next()
                    .ok_or("adapt 需要任务类型 (code|analysis|creative)")?;
                let task = TaskType::parse(&t).ok_or(format!("未知任务类型: {}", t))?;
                mode = Mode::Adapt(task);
            }
            "--timeout" => {
                let v = args.next().ok_or("--timeout 需要数值")?;
                timeout_secs = v.parse().map_err(|_| format!("无效超时: {}", v))?;
            }
            "--endpoints" => {
                endpoints_path = args.next().ok_or("--endpoints 需要文件路径")?;
            }
            "--markdown" => markdown = true,
            _ => prompt_parts.push(arg),
        }
        first = false;
    }

    if prompt_parts.is_empty() {
        return Err("缺少提示词".to_string());
    }
    Ok(CliArgs {
        mode,
        prompt: prompt_parts.join(" "),
        endpoints_path,
        timeout_secs,
        markdown,
    })
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> io::Result<()> {
    // 日志写到文件，终端只留结果输出
    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let log_dir = std::path::PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join(format!("app-{}.log", ts)))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter_level(log::LevelFilter::Warn)
        .filter_module("promptfan", log::LevelFilter::Info)
        .init();

    // 加载 .env / .env.local
    settings::load_env();

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("参数错误: {}", msg);
            print_usage();
            std::process::exit(2);
        }
    };

    let endpoints = match settings::load_endpoints(&args.endpoints_path) {
        Ok(list) => list,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    let active = settings::active_endpoints(&endpoints);
    if active.is_empty() {
        eprintln!("✗ 没有激活的端点（清单为空或 is_active 全为 false）");
        std::process::exit(1);
    }
    info!(
        "已加载端点 {} 个，其中激活 {} 个",
        endpoints.len(),
        active.len()
    );

    let dispatcher = match Dispatcher::new() {
        Ok(d) => d.with_timeout(args.timeout_secs),
        Err(e) => {
            eprintln!("✗ HTTP 客户端初始化失败: {}", e);
            std::process::exit(1);
        }
    };

    match args.mode {
        Mode::Send => {
            let prompt = if args.markdown {
                format!("{}{}", MARKDOWN_HINT, args.prompt)
            } else {
                args.prompt.clone()
            };

            // 每个端点一完成就先报一行进度
            let callback: DispatchCallback = Box::new(|cfg, success, _text| {
                if success {
                    println!("✓ [{}] 已返回", cfg.name);
                } else {
                    println!("✗ [{}] 失败", cfg.name);
                }
            });

            let results = dispatcher
                .send_to_all(&active, &prompt, Some(callback))
                .await;

            println!();
            for r in &results {
                let state = if r.success { "成功" } else { "失败" };
                println!("===== {} ({}) =====", r.endpoint, state);
                println!("{}\n", r.text);
            }
            let ok = results.iter().filter(|r| r.success).count();
            println!("完成: {}/{} 个端点成功", ok, results.len());
        }
        Mode::Improve => {
            let service = ImproveService::new(dispatcher);
            match service.improve(&active[0], &args.prompt).await {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("✗ 改进失败: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Mode::Alternatives => {
            let service = ImproveService::new(dispatcher);
            match service.alternatives(&active[0], &args.prompt).await {
                Ok(alts) => {
                    for (i, alt) in alts.iter().enumerate() {
                        println!("{}. {}", i + 1, alt);
                    }
                }
                Err(e) => {
                    eprintln!("✗ 生成候选失败: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Mode::Adapt(task) => {
            let service = ImproveService::new(dispatcher);
            match service.adapt(&active[0], &args.prompt, task).await {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("✗ 适配失败: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
