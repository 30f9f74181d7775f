use std::collections::HashMap;

use crate::counters::Counter;
use crate::dcgm::topology::{DeviceInfo, GpuInstanceInfo};
use crate::dcgm::values::{is_blank, FieldType, FieldValue};
use crate::metric::{uuid_label_key, Metric};

/// Marker returned for values that carry no usable data; counters that
/// stringify to this are omitted from the output
pub const SKIP_VALUE: &str = "SKIPPING DCGM VALUE";

/// Marker emitted in place of a value with an unrecognized type tag
pub const FAILED_TO_CONVERT: &str = "ERROR - FAILED TO CONVERT TO STRING";

/// Render one field value as text.
///
/// Sentinel codes are checked first, under both numeric interpretations and
/// regardless of the declared type tag; any match yields [`SKIP_VALUE`].
/// Otherwise the declared tag picks the format. An unrecognized tag yields
/// [`FAILED_TO_CONVERT`] rather than an error: one bad field must not abort
/// the entity's pass.
pub fn stringify(value: &FieldValue) -> String {
    if is_blank(value) {
        return SKIP_VALUE.to_string();
    }
    match value.field_type {
        FieldType::Str => value
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| FAILED_TO_CONVERT.to_string()),
        FieldType::Double => format!("{:.6}", value.as_f64()),
        FieldType::Int64 => format!("{}", value.as_i64()),
        _ => FAILED_TO_CONVERT.to_string(),
    }
}

/// Convert one entity's raw field values into metric records.
///
/// `values` and `counters` are positionally paired: `values[i]` is the
/// reading for `counters[i]`. The caller guarantees equal length and
/// matching order, which holds whenever the field watch was built from the
/// same counter list.
pub fn to_metrics(
    values: &[FieldValue],
    counters: &[Counter],
    device: &DeviceInfo,
    instance: Option<&GpuInstanceInfo>,
    use_old_namespace: bool,
) -> Vec<Metric> {
    debug_assert_eq!(values.len(), counters.len());

    let mut metrics = Vec::with_capacity(counters.len());
    for (value, counter) in values.iter().zip(counters) {
        let rendered = stringify(value);
        // Filter out counters with no value
        if rendered == SKIP_VALUE {
            continue;
        }

        let mut metric = Metric {
            name: counter.field_name.clone(),
            value: rendered,

            uuid_key: uuid_label_key(use_old_namespace).to_string(),
            gpu: format!("{}", device.gpu),
            gpu_uuid: device.uuid.clone(),
            gpu_device: format!("nvidia{}", device.gpu),

            mig_profile: None,
            gpu_instance_id: None,

            attributes: HashMap::new(),
        };
        if let Some(instance) = instance {
            metric.mig_profile = Some(instance.profile_name.clone());
            metric.gpu_instance_id = Some(format!("{}", instance.instance_id));
        }
        metrics.push(metric);
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcgm::values::{
        DCGM_FP64_NOT_SUPPORTED, DCGM_INT32_NOT_FOUND, DCGM_INT64_BLANK,
    };

    fn device() -> DeviceInfo {
        DeviceInfo {
            gpu: 3,
            uuid: "GPU-7df3ba26".to_string(),
        }
    }

    fn counters() -> Vec<Counter> {
        vec![
            Counter::new(150, "DCGM_FI_DEV_GPU_TEMP", "GPU temperature (in C)."),
            Counter::new(155, "DCGM_FI_DEV_POWER_USAGE", "Power draw (in W)."),
            Counter::new(50, "DCGM_FI_DEV_NAME", "Device name."),
        ]
    }

    #[test]
    fn test_stringify_int64() {
        assert_eq!(stringify(&FieldValue::int64(150, 83)), "83");
        assert_eq!(stringify(&FieldValue::int64(230, -1)), "-1");
    }

    #[test]
    fn test_stringify_double_is_fixed_point() {
        assert_eq!(stringify(&FieldValue::double(155, 137.5)), "137.500000");
        assert_eq!(stringify(&FieldValue::double(203, 0.0)), "0.000000");
    }

    #[test]
    fn test_stringify_string_passthrough() {
        assert_eq!(
            stringify(&FieldValue::string(50, "NVIDIA A100-SXM4-80GB")),
            "NVIDIA A100-SXM4-80GB"
        );
    }

    #[test]
    fn test_stringify_sentinels_skip() {
        assert_eq!(
            stringify(&FieldValue::int64(150, DCGM_INT64_BLANK)),
            SKIP_VALUE
        );
        assert_eq!(
            stringify(&FieldValue::int64(150, DCGM_INT32_NOT_FOUND)),
            SKIP_VALUE
        );
        assert_eq!(
            stringify(&FieldValue::double(155, DCGM_FP64_NOT_SUPPORTED)),
            SKIP_VALUE
        );
    }

    #[test]
    fn test_stringify_unrecognized_tag() {
        assert_eq!(
            stringify(&FieldValue::blob(1000, vec![1, 2, 3])),
            FAILED_TO_CONVERT
        );
    }

    #[test]
    fn test_to_metrics_builds_labels() {
        let values = vec![
            FieldValue::int64(150, 83),
            FieldValue::double(155, 137.5),
            FieldValue::string(50, "NVIDIA A100-SXM4-80GB"),
        ];
        let metrics = to_metrics(&values, &counters(), &device(), None, false);

        assert_eq!(metrics.len(), 3);
        let first = &metrics[0];
        assert_eq!(first.name, "DCGM_FI_DEV_GPU_TEMP");
        assert_eq!(first.value, "83");
        assert_eq!(first.uuid_key, "UUID");
        assert_eq!(first.gpu, "3");
        assert_eq!(first.gpu_uuid, "GPU-7df3ba26");
        assert_eq!(first.gpu_device, "nvidia3");
        assert_eq!(first.mig_profile, None);
        assert_eq!(first.gpu_instance_id, None);
        assert!(first.attributes.is_empty());
    }

    #[test]
    fn test_to_metrics_omits_skipped_counters() {
        let values = vec![
            FieldValue::int64(150, DCGM_INT64_BLANK),
            FieldValue::double(155, 137.5),
            FieldValue::string(50, "NVIDIA A100-SXM4-80GB"),
        ];
        let metrics = to_metrics(&values, &counters(), &device(), None, false);

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].name, "DCGM_FI_DEV_POWER_USAGE");
        assert_eq!(metrics[1].name, "DCGM_FI_DEV_NAME");
    }

    #[test]
    fn test_to_metrics_legacy_namespace_changes_only_uuid_key() {
        let values = vec![
            FieldValue::int64(150, 83),
            FieldValue::double(155, 137.5),
            FieldValue::string(50, "NVIDIA A100-SXM4-80GB"),
        ];
        let current = to_metrics(&values, &counters(), &device(), None, false);
        let legacy = to_metrics(&values, &counters(), &device(), None, true);

        for (new_metric, old_metric) in current.iter().zip(&legacy) {
            assert_eq!(new_metric.uuid_key, "UUID");
            assert_eq!(old_metric.uuid_key, "uuid");

            assert_eq!(new_metric.name, old_metric.name);
            assert_eq!(new_metric.value, old_metric.value);
            assert_eq!(new_metric.gpu, old_metric.gpu);
            assert_eq!(new_metric.gpu_uuid, old_metric.gpu_uuid);
            assert_eq!(new_metric.gpu_device, old_metric.gpu_device);
        }
    }

    #[test]
    fn test_to_metrics_sets_instance_labels() {
        let instance = GpuInstanceInfo {
            profile_name: "1g.10gb".to_string(),
            entity_id: 42,
            instance_id: 5,
        };
        let values = vec![FieldValue::int64(150, 61)];
        let counters = vec![Counter::new(150, "DCGM_FI_DEV_GPU_TEMP", "GPU temperature (in C).")];

        let metrics = to_metrics(&values, &counters, &device(), Some(&instance), false);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].mig_profile.as_deref(), Some("1g.10gb"));
        assert_eq!(metrics[0].gpu_instance_id.as_deref(), Some("5"));
    }
}
