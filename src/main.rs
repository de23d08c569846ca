use desk_scene::{
    config::SceneConfig,
    context::{GpuContext, RenderContext},
    pipelines::{SceneUniforms, UniformUpload, light::LightsUniform},
    resources::{
        FileDecoder,
        mesh::{DrawLog, Primitive},
        texture::{MemoryTextureDevice, WgpuTextureDevice},
    },
    scene::DeskScene,
};

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Logger already initialized: {e}");
    }

    let config = SceneConfig::from_env();
    log::info!("Loading assets from {}", config.asset_dir.display());

    let draws = match GpuContext::headless_blocking() {
        Ok(gpu) => render_on_gpu(config, &gpu)?,
        Err(e) => {
            log::warn!("No GPU available ({e:#}); recording the frame without a device");
            render_recorded(config)?
        }
    };

    for primitive in Primitive::ALL {
        println!("{primitive:?}: {} draws", draws.count(primitive));
    }
    println!("total: {} draws", draws.calls().len());
    Ok(())
}

fn render_on_gpu(config: SceneConfig, gpu: &GpuContext) -> anyhow::Result<DrawLog> {
    let mut device = WgpuTextureDevice::new(gpu);
    let mut ctx = RenderContext::new(config.texture_units);
    let mut meshes = DrawLog::new();

    let mut scene = DeskScene::prepare(config, &mut device, &FileDecoder, &mut meshes, &mut ctx)?;
    log::info!("{} textures resident on {}", device.len(), gpu.adapter_info.name);

    let uniforms = SceneUniforms::new(gpu, LightsUniform::from(scene.lights()));
    let mut upload = UniformUpload::new(gpu, &uniforms, meshes);
    let rendered = scene.render(&mut ctx, &mut upload);
    log::info!("Wrote {} object uniform blocks", upload.uploads());

    scene.teardown(&mut device);
    rendered?;
    Ok(upload.into_inner())
}

fn render_recorded(config: SceneConfig) -> anyhow::Result<DrawLog> {
    let mut device = MemoryTextureDevice::new();
    let mut ctx = RenderContext::new(config.texture_units);
    let mut meshes = DrawLog::new();

    let mut scene = DeskScene::prepare(config, &mut device, &FileDecoder, &mut meshes, &mut ctx)?;
    let rendered = scene.render(&mut ctx, &mut meshes);
    scene.teardown(&mut device);
    rendered?;
    Ok(meshes)
}
