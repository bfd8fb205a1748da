use serde::Serialize;

use crate::form::MetricField;

#[derive(Serialize)]
struct FieldSpec {
    key: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
}

fn field_specs_json() -> serde_json::Result<String> {
    let specs: Vec<FieldSpec> = MetricField::ALL
        .into_iter()
        .map(|field| {
            let limits = field.limits();
            FieldSpec {
                key: field.key(),
                label: field.label(),
                min: limits.min,
                max: limits.max,
            }
        })
        .collect();

    Ok(serde_json::to_string(&specs)?.replace("</", "<\\/"))
}

pub fn render() -> serde_json::Result<String> {
    Ok(PAGE.replace("__FIELD_SPECS__", &field_specs_json()?))
}

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Grade Predictor</title>
    <style>
        body { font-family: Arial, sans-serif; background: #000; color: #fff; max-width: 960px; margin: 50px auto; padding: 20px; }
        h1 { text-align: center; margin-bottom: 4px; }
        .subtitle { text-align: center; color: #737373; letter-spacing: 2px; font-size: 12px; margin-bottom: 40px; }
        .container { background: #171717; padding: 25px; }
        .grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; }
        label { display: block; margin-bottom: 6px; color: #a3a3a3; font-size: 14px; font-weight: bold; }
        input { width: 100%; box-sizing: border-box; padding: 10px; background: #000; color: #fff; border: 1px solid #262626; }
        input.invalid { border-color: #ff6b6b; }
        .field-error { color: #ff6b6b; font-size: 12px; min-height: 16px; margin-top: 4px; }
        .message { color: #ff6b6b; background: rgba(255, 107, 107, 0.1); text-align: center; padding: 12px; margin-top: 20px; display: none; }
        .actions { text-align: center; margin-top: 25px; }
        button { background: #ff6b6b; color: #fff; padding: 12px 32px; border: none; font-weight: bold; letter-spacing: 2px; cursor: pointer; }
        button:disabled { opacity: 0.5; cursor: not-allowed; }
        .result { display: none; margin-top: 40px; padding-top: 30px; border-top: 1px solid #262626; }
        .grade { font-size: 56px; font-weight: bold; text-align: center; }
        .bar-row { display: flex; align-items: center; margin: 6px 0; font-size: 13px; }
        .bar-label { width: 140px; color: #737373; }
        .bar { background: #ff6b6b; height: 14px; }
    </style>
</head>
<body>
    <h1>Grade Predictor</h1>
    <div class="subtitle">GRADE PREDICTION</div>

    <div class="container">
        <div id="fields" class="grid"></div>
        <div id="message" class="message"></div>
        <div class="actions">
            <button id="predict" onclick="predictGrade()">PREDICT GRADE</button>
        </div>

        <div id="result" class="result">
            <div id="grade" class="grade"></div>
            <div class="subtitle">PREDICTED GRADE</div>
            <h4>FEATURE IMPORTANCE</h4>
            <div id="chart"></div>
        </div>
    </div>

    <script>
        const FIELDS = __FIELD_SPECS__;
        const formData = {};
        let loading = false;

        const DECIMAL = /^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$/;

        function validateInput(spec, value) {
            const trimmed = value.trim();
            if (!DECIMAL.test(trimmed)) return 'Please enter a valid number';
            const num = Number(trimmed);
            if (!Number.isFinite(num)) return 'Please enter a valid number';
            if (num < spec.min) return `Minimum value is ${spec.min}`;
            if (num > spec.max) return `Maximum value is ${spec.max}`;
            return '';
        }

        function firstInvalid() {
            return FIELDS.find(spec => validateInput(spec, formData[spec.key] || '') !== '');
        }

        function refreshButton() {
            const button = document.getElementById('predict');
            button.disabled = loading || firstInvalid() !== undefined;
            button.textContent = loading ? 'PROCESSING...' : 'PREDICT GRADE';
        }

        function showMessage(text) {
            const message = document.getElementById('message');
            message.textContent = text;
            message.style.display = text ? 'block' : 'none';
        }

        function handleInputChange(spec, input) {
            formData[spec.key] = input.value;
            const error = validateInput(spec, input.value);
            const errorDiv = document.getElementById('error-' + spec.key);
            input.classList.toggle('invalid', error !== '');
            errorDiv.textContent = error;
            showMessage('');
            refreshButton();
        }

        function renderResult(data) {
            document.getElementById('grade').textContent = `${data.prediction}%`;
            const max = Math.max(...data.featureImportance.map(f => f.importance));
            document.getElementById('chart').innerHTML = data.featureImportance.map(f => `
                <div class="bar-row">
                    <span class="bar-label">${f.name}</span>
                    <span class="bar" style="width: ${(f.importance / max) * 70}%"></span>
                    <span style="margin-left: 8px;">${f.importance.toFixed(2)}</span>
                </div>
            `).join('');
            document.getElementById('result').style.display = 'block';
        }

        async function predictGrade() {
            if (loading || firstInvalid() !== undefined) return;
            loading = true;
            showMessage('');
            refreshButton();
            try {
                const response = await fetch('/api/predict', {
                    method: 'POST',
                    headers: {'Content-Type': 'application/json'},
                    body: JSON.stringify(formData)
                });
                if (!response.ok) throw new Error(`status ${response.status}`);
                renderResult(await response.json());
            } catch (error) {
                console.error('Error:', error);
                showMessage('Prediction failed. Please try again.');
            }
            loading = false;
            refreshButton();
        }

        const container = document.getElementById('fields');
        for (const spec of FIELDS) {
            formData[spec.key] = '';
            const wrapper = document.createElement('div');
            wrapper.innerHTML = `
                <label for="${spec.key}">${spec.label}</label>
                <input type="text" id="${spec.key}" placeholder="Enter ${spec.label.toLowerCase()} (${spec.min}-${spec.max})">
                <div class="field-error" id="error-${spec.key}"></div>
            `;
            container.appendChild(wrapper);
            const input = wrapper.querySelector('input');
            input.addEventListener('input', () => handleInputChange(spec, input));
        }
        refreshButton();
    </script>
</body>
</html>
"#;
